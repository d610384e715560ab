//! Firmware tasks

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Read;

use obscura_core::{Controller, LinkStats};

use crate::components::LedIndicator;
use crate::storage::SdStorage;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// How long the link may stay quiet before diagnostics run
const IDLE_PERIOD: Duration = Duration::from_secs(5);

/// Command link task - pumps UART bytes into the controller
///
/// The controller is a pure state machine, so this task is the single
/// writer the storage path requires.
#[embassy_executor::task]
pub async fn link_task(
    mut rx: BufferedUartRx,
    mut controller: Controller<SdStorage, LedIndicator>,
) {
    info!("Command link task started");

    let mut buf = [0u8; RX_BUF_SIZE];
    let mut last_stats = LinkStats::default();

    loop {
        match with_timeout(IDLE_PERIOD, rx.read(&mut buf)).await {
            Ok(Ok(n)) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    if let Err(e) = controller.feed(byte) {
                        error!("Storage failure: {:?}", Debug2Format(&e));
                        return storage_halt(controller).await;
                    }
                }

                let stats = *controller.stats();
                if stats != last_stats {
                    debug!("Link stats: {}", stats);
                    last_stats = stats;
                }
            }
            Ok(Ok(_)) => {
                // No bytes read, continue
            }
            Ok(Err(e)) => {
                warn!("UART read error: {:?}", e);
            }
            Err(_) => {
                // Idle window: surface a stalled color rendezvous, which
                // has no timeout of its own and would otherwise be
                // indistinguishable from a quiet host
                if controller.is_awaiting_low_byte() {
                    warn!(
                        "Capture stalled: awaiting RGB low byte ({} pairs discarded)",
                        controller.stats().discarded_pairs
                    );
                }
            }
        }
    }
}

/// Storage died mid-capture: latch the lamp and stop servicing the link
async fn storage_halt(mut controller: Controller<SdStorage, LedIndicator>) -> ! {
    use obscura_core::traits::Indicator;

    controller.indicator_mut().set(true);
    loop {
        embassy_time::Timer::after_secs(1).await;
    }
}
