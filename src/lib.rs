//! Rust library for controlling climate devices that speak the TFIAC protocol
//!
//! TFIAC is a small XML-over-UDP protocol used by a family of air conditioners. This
//! library provides an async client that can:
//!
//! - Fetch the device status (temperatures, mode, fan speed, swing, power)
//! - Change the target temperature, operation mode, fan speed or power
//! - Change the swing direction
//!
//! # Quick Start
//!
//! ```no_run
//! use tfiac::{OperationMode, Setting, SwingMode, TfiacClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connecting fetches the current status once
//!     let mut client = TfiacClient::connect("192.168.1.40").await;
//!
//!     if let Some(status) = client.status() {
//!         println!("{:?}: {} -> {}", client.name(), status.current_temp, status.target_temp);
//!     }
//!
//!     client.set_state(Setting::Operation(OperationMode::Cool)).await?;
//!     client.set_swing(SwingMode::Vertical).await?;
//!
//!     // Pick up the device's view of the changes
//!     client.update().await;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **Client**: cached status and the public operations
//! - **Connection**: one UDP datagram out, one back, bounded by a timeout
//! - **Protocol**: XML envelopes and status reply parsing
//! - **Types**: protocol enums, the status record and settable fields

mod client;
mod config;
mod connection;
mod error;
mod protocol;
mod sequence;
mod types;

// Public exports
pub use client::TfiacClient;
pub use config::TfiacConfig;
pub use error::{Result, TfiacError};
pub use sequence::{SequenceSource, SystemClock};
pub use types::{
    DeviceStatus, FanMode, OperationMode, Power, Setting, SwingMode, FAN_LIST, MAX_TEMP,
    MIN_TEMP, OPERATION_LIST, SWING_LIST, UDP_PORT,
};
