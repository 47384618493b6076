use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use nowlink_api::MacAddress;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{self, Instant};

use crate::session::{Session, log_event};
use crate::settings::Settings;

pub mod session;
pub mod settings;

/// Opens the gateway's serial device and serves it, reopening it whenever
/// it disappears.
pub async fn run(settings: &Arc<Settings>) -> Result<(), Box<dyn Error>> {
    let probes = settings.probe_targets()?;
    let path = &settings.serial.path;
    let delay = Duration::from_millis(settings.serial.reconnect_delay_ms);
    let started = Instant::now();

    loop {
        match OpenOptions::new().read(true).write(true).open(path).await {
            Ok(port) => {
                tracing::info!("Connected to {}", path);
                match serve(port, probes.clone(), started).await {
                    Ok(()) => tracing::warn!("{} closed", path),
                    Err(e) => tracing::error!("{} failed: {}", path, e),
                }
            }
            Err(e) => tracing::warn!("Cannot open {}: {}", path, e),
        }

        time::sleep(delay).await;
    }
}

/// Runs one session until the port reports end of stream.
pub async fn serve<P>(
    mut port: P,
    probes: Vec<(MacAddress, String)>,
    started: Instant,
) -> io::Result<()>
where
    P: AsyncRead + AsyncWrite + Unpin,
{
    let mut session = Session::new(probes);
    let mut buf = [0u8; 512];

    loop {
        let len = port.read(&mut buf).await?;
        if len == 0 {
            let stats = session.stats();
            tracing::debug!(
                "Session ended: {} frames, {} checksum errors, {} dropped, {} timeouts",
                stats.frames,
                stats.checksum_errors,
                stats.dropped,
                stats.timeouts
            );
            return Ok(());
        }

        let now_ms = started.elapsed().as_millis() as u64;
        for event in session.process(&buf[..len], now_ms) {
            log_event(&event);
            for frame in session.respond(&event) {
                port.write_all(&frame).await?;
            }
        }
        port.flush().await?;
    }
}
