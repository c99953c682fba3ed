//! Print the status of a TFIAC device
//!
//! ```text
//! cargo run --example status -- 192.168.1.40
//! ```

use tfiac::TfiacClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let host = std::env::args()
        .nth(1)
        .ok_or("usage: status <host>")?;

    let client = TfiacClient::connect(host).await;

    match client.status() {
        Some(status) => {
            println!("Device:      {}", client.name().unwrap_or("(unnamed)"));
            println!("Power:       {}", status.is_on);
            println!("Mode:        {}", status.operation);
            println!("Indoor:      {}", status.current_temp);
            println!("Target:      {}", status.target_temp);
            println!("Fan:         {}", status.fan_mode);
            println!("Swing:       {}", status.swing_mode);
        }
        None => println!("No status received from {}", client.host()),
    }

    Ok(())
}
