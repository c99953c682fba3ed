use std::time::Duration;
use thiserror::Error;

/// Result type for TFIAC operations
pub type Result<T> = std::result::Result<T, TfiacError>;

/// Errors that can occur when talking to a TFIAC device
#[derive(Error, Debug)]
pub enum TfiacError {
    /// Socket-level failure (bind, resolve, send, receive)
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),

    /// No reply datagram arrived within the configured timeout
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// The status reply was incomplete or carried unusable values
    #[error("Parse error: {0}")]
    Parse(String),

    /// The status reply was not well-formed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    /// A value outside the protocol's lookup tables was requested
    #[error("Unsupported {kind} value: {value}")]
    UnsupportedValue {
        /// Which table was consulted (e.g. "swing")
        kind: &'static str,
        /// The rejected input
        value: String,
    },

    /// A mutation needs a full status snapshot and none has been fetched yet
    #[error("No device status available")]
    StatusUnavailable,
}
