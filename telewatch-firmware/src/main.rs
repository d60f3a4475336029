//! Telewatch - analogue/digital watchface firmware
//!
//! Main firmware binary for an RP2040 board driving a 144x168 Sharp
//! memory LCD. A companion device on UART0 changes settings and sets the
//! clock; a push button shows and hides the watchface window.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use telewatch_core::scheduler::Watchface;
use telewatch_core::settings::SettingsStore;
use telewatch_display::FrameBuffer;
use telewatch_hal_rp2040::{RtcClock, Rp2040SettingsFlash};

mod channels;
mod config;
mod display;
mod tasks;

use crate::display::MemoryLcd;
use crate::tasks::watchface::send_snapshot;
use crate::tasks::CLOCK;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 128]> = StaticCell::new();

// Too large for the task stack
static FRAMEBUFFER: ConstStaticCell<FrameBuffer> = ConstStaticCell::new(FrameBuffer::new());

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Telewatch firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Start the RTC; it loses its value on reset
    let mut clock = RtcClock::new(p.RTC);
    if !clock.is_running() {
        match config::initial_clock() {
            Some(initial) => {
                if let Err(e) = clock.set(&initial) {
                    warn!("RTC seed failed: {:?}", e);
                } else {
                    info!("RTC seeded with {:?}", initial);
                }
            }
            None => warn!("watch.toml initial clock is not a valid time"),
        }
    }
    CLOCK.lock(|cell| *cell.borrow_mut() = Some(clock));

    // Settings from flash, locale default for anything never stored
    let flash = Rp2040SettingsFlash::new(p.FLASH, p.DMA_CH0);
    let store = SettingsStore::load(flash, config::LOCALE_PREFERS_24H);
    let watchface = Watchface::new(store);
    info!("Settings loaded: {:?}", watchface.settings());

    // Setup UART for the companion link
    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = config::COMPANION_BAUD;
        cfg
    };

    let tx_buf = TX_BUF.init([0u8; 128]);
    let rx_buf = RX_BUF.init([0u8; 128]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for companion communication");

    // Tell the companion what we booted with
    send_snapshot(watchface.snapshot());

    // Setup SPI0 for the memory LCD (SCK=GPIO18, MOSI=GPIO19, CS=GPIO17, DISP=GPIO16)
    let spi_config = {
        let mut cfg = spi::Config::default();
        cfg.frequency = config::SPI_FREQUENCY_HZ;
        cfg
    };
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::Low);
    let disp = Output::new(p.PIN_16, Level::Low);
    let panel = MemoryLcd::new(spi, cs, disp, Delay);

    info!("Panel SPI initialized");

    // Window toggle button, active low
    let button = Input::new(p.PIN_15, Pull::Up);

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::companion_rx_task(rx)).unwrap();
    spawner.spawn(tasks::companion_tx_task(tx)).unwrap();
    spawner.spawn(tasks::button_task(button)).unwrap();
    spawner
        .spawn(tasks::watchface_task(watchface, FRAMEBUFFER.take(), panel))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
