//! Valve and flag control example

use std::time::Duration;
use tracing_subscriber::EnvFilter;

use neptun::{Device, DeviceConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let ip = std::env::var("DEVICE_IP").unwrap_or_else(|_| "192.168.1.50".to_string());

    // Shorter settle wait for a bench unit
    let config = DeviceConfig::default().with_valve_settle_delay(Duration::from_secs(10));
    let device = Device::with_config(ip, neptun::DEFAULT_PORT, config);

    println!("Closing valve...");
    println!("confirmed: {}", device.set_valve_state(false).await);

    println!("Enabling auto-close...");
    println!("accepted: {}", device.set_auto_close(true).await);

    println!("Opening valve...");
    println!("confirmed: {}", device.set_valve_state(true).await);

    if let Some(state) = device.get_cached_state() {
        println!("{}", state);
    }
}
