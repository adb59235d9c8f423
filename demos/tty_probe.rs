use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};
use zabertmm::{
    channel::{config::SerialConfig, tty::TtyChannel},
    controller::ZaberController,
};

/// Exercises one stage end to end: register, home, move, poll until
/// idle, read back the position.
///
/// Usage: tty_probe [port] [axis] [target]
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut args = std::env::args().skip(1);
    let mut config = SerialConfig::default();
    if let Some(port) = args.next() {
        config.port = port;
    }
    let axis: u8 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(1);
    let target: i32 = args.next().map(|t| t.parse()).transpose()?.unwrap_or(1000);

    let channel = TtyChannel::open(&config)?;
    let mut controller = ZaberController::new(channel);

    controller.add_device(axis).await?;
    info!(axis, "Axis registered");

    let result = controller.send_to_ctrl(&format!("homing {}", axis)).await;
    info!(result = %result, "Homing requested");

    controller.start_move(axis, target).await?;
    loop {
        let info = controller.query_status(axis).await?;
        info!(state = ?info.state, message = ?info.message, "Status");
        if !info.is_moving() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    let reading = controller.read_position(axis).await?;
    if reading.is_fresh() {
        info!(position = reading.value(), "Final position");
    } else {
        warn!(position = reading.value(), "Final position is stale");
    }

    controller.remove_device(axis);
    Ok(())
}
