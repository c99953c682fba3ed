use crate::config::TfiacConfig;
use crate::connection::Connection;
use crate::error::{Result, TfiacError};
use crate::protocol::{self, StatusReport};
use crate::sequence::{SequenceSource, SystemClock};
use crate::types::{DeviceStatus, Setting, SwingMode};

/// Client for a single TFIAC climate device
///
/// The client keeps the last status it fetched and the device's advertised name.
/// Every operation performs its network round trip before returning; there is no
/// background polling.
///
/// Mutating operations take `&mut self`. To share one client between tasks, wrap it
/// in a lock of your own: an `update` interleaved with a `set_state` would otherwise
/// race on the cached status.
pub struct TfiacClient {
    connection: Connection,
    sequence: Box<dyn SequenceSource>,
    name: Option<String>,
    status: Option<DeviceStatus>,
}

impl TfiacClient {
    /// Create a client for the device at `host` on the default port and fetch its status
    ///
    /// An unreachable device does not make this fail; the status simply stays empty
    /// until a later [`update`](Self::update) succeeds.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tfiac::{Setting, TfiacClient};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let mut client = TfiacClient::connect("192.168.1.40").await;
    ///     if let Some(status) = client.status() {
    ///         println!("{:?} is at {}", client.name(), status.current_temp);
    ///     }
    ///     client.set_state(Setting::TargetTemp(72.0)).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn connect(host: impl Into<String>) -> Self {
        Self::connect_with(TfiacConfig::new(host), SystemClock).await
    }

    /// Create a client from an explicit config and sequence source, then fetch its status
    pub async fn connect_with(config: TfiacConfig, sequence: impl SequenceSource + 'static) -> Self {
        tracing::info!("Creating TFIAC client for {}:{}", config.host, config.port);

        let mut client = Self {
            connection: Connection::new(&config),
            sequence: Box::new(sequence),
            name: None,
            status: None,
        };
        client.update().await;
        client
    }

    /// Refresh the cached status from the device
    ///
    /// Failures are logged and leave the previous name and status in place.
    pub async fn update(&mut self) {
        match self.fetch_status().await {
            Ok(report) => {
                self.name = Some(report.name);
                self.status = Some(report.status);
            }
            Err(e) => {
                tracing::error!("Failed to update status from {}: {}", self.connection.host(), e);
            }
        }
    }

    async fn fetch_status(&self) -> Result<StatusReport> {
        let query = protocol::build_status_query(self.sequence.next_seq());
        let reply = self.connection.exchange(&query).await?;
        protocol::parse_status_response(&reply)
    }

    /// Change one setting on the device
    ///
    /// The status is always refreshed first so the other fields are sent with their
    /// current values, then the merged state is sent as a whole. The device's reply
    /// is awaited but not inspected.
    pub async fn set_state(&mut self, setting: Setting) -> Result<()> {
        self.update().await;

        let Some(status) = self.status.as_mut() else {
            tracing::warn!("Not sending {}: no status fetched from {}", setting, self.connection.host());
            return Err(TfiacError::StatusUnavailable);
        };
        status.apply(setting);

        let body = protocol::build_update_body(status);
        self.send_set(&body).await
    }

    /// Set the swing direction
    ///
    /// The cached status is not touched; its `swing_mode` catches up on the next
    /// [`update`](Self::update).
    pub async fn set_swing(&self, swing: SwingMode) -> Result<()> {
        self.send_set(protocol::build_swing_body(swing)).await
    }

    /// Set the swing direction by name (`Off`, `Vertical`, `Horizontal` or `Both`)
    ///
    /// Unknown names fail with [`TfiacError::UnsupportedValue`] before anything is
    /// sent.
    pub async fn set_swing_named(&self, swing: &str) -> Result<()> {
        let swing: SwingMode = swing.parse()?;
        self.set_swing(swing).await
    }

    async fn send_set(&self, body: &str) -> Result<()> {
        let message = protocol::build_set_envelope(self.sequence.next_seq(), body);
        self.connection.exchange(&message).await?;
        Ok(())
    }

    /// Name the device reported in its last successful status reply
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Last successfully fetched status
    pub fn status(&self) -> Option<&DeviceStatus> {
        self.status.as_ref()
    }

    pub fn host(&self) -> &str {
        self.connection.host()
    }
}
