use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the `seq` attribute stamped on every outbound envelope
///
/// The device echoes it back to correlate replies; it only needs to be very likely
/// unique and increasing within a session.
pub trait SequenceSource: Send + Sync {
    /// Value for the next outbound message
    fn next_seq(&self) -> u64;
}

/// Milliseconds since the Unix epoch
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SequenceSource for SystemClock {
    fn next_seq(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or_default()
    }
}
