//! Obscura - Capture Controller Firmware
//!
//! Firmware binary for RP2040-based capture controllers. The board sits
//! between a host (typically a camera module) and an SD card: commands
//! arrive over UART, image bytes leave through the storage backend.
//!
//! Named after the camera obscura - the controller never sees the
//! sensor, only the darkened image of it that arrives over the wire.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::Spi;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use obscura_core::Controller;

use crate::components::LedIndicator;
use crate::storage::SdStorage;

mod board;
mod components;
mod storage;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Obscura firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Host command link on UART0 (GPIO0 TX, GPIO1 RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = board::LINK_BAUD;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();

    info!("Command link ready at {} baud", board::LINK_BAUD);

    // Onboard LED: host-driven indicator, and failure lamp before that
    let led = Output::new(p.PIN_25, Level::Low);

    // SD card on SPI1 (GPIO10 SCK, GPIO11 MOSI, GPIO12 MISO, GPIO13 CS)
    let mut spi_config = embassy_rp::spi::Config::default();
    spi_config.frequency = board::SD_SPI_HZ;
    let spi = Spi::new_blocking(p.SPI1, p.PIN_10, p.PIN_11, p.PIN_12, spi_config);
    let cs = Output::new(p.PIN_13, Level::High);
    let spi_dev = ExclusiveDevice::new(spi, cs, Delay).unwrap();

    // Storage must come up before the controller exists; without it the
    // device has no job
    let storage = match SdStorage::new(spi_dev) {
        Ok(storage) => storage,
        Err(e) => {
            error!("SD card init failed: {:?}", Debug2Format(&e));
            fail_halt(led).await
        }
    };
    info!("SD card ready");

    let controller =
        Controller::with_metadata(storage, LedIndicator::new(led), board::BOOT_METADATA);

    spawner.spawn(tasks::link_task(rx, controller)).unwrap();
    info!("Controller task spawned, firmware running");

    // Main task has nothing else to do - all work happens in the link task
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Latch the failure lamp and stop servicing the link
async fn fail_halt(mut led: Output<'static>) -> ! {
    led.set_high();
    loop {
        embassy_time::Timer::after_secs(1).await;
    }
}
