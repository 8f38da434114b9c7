//! Poll a controller and print its state

use std::time::Duration;
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

use neptun::Device;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let ip = std::env::var("DEVICE_IP").unwrap_or_else(|_| "192.168.1.50".to_string());

    let device = Device::new(ip, neptun::DEFAULT_PORT);

    for _ in 0..3 {
        if device.refresh().await {
            if let Some(state) = device.get_cached_state() {
                println!("{}", state.info);
                println!("{}", state);

                for sensor in &state.sensors {
                    println!(
                        "  sensor {} (reported {}): {}, battery {}%, signal {}",
                        sensor.index,
                        sensor.reported_index,
                        sensor.status,
                        sensor.battery_percent,
                        sensor.raw_signal
                    );
                }
                println!("  counters: {:?}", state.counters);
            }
        } else {
            println!("No state from {}", device.host());
        }

        println!("online: {}, last update: {:?}", device.is_online(), device.last_update());
        sleep(Duration::from_secs(30)).await;
    }
}
