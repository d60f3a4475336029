//! Watchface task
//!
//! Owns the watchface, the compositor, the framebuffer and the panel.
//! Events from the other tasks are handled one at a time, and each one is
//! followed by a compose and a flush of whatever lines changed.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Delay, Duration, Ticker};

use telewatch_core::scheduler::{TickReport, Watchface};
use telewatch_core::traits::{Cadence, TickSource};
use telewatch_core::WallTime;
use telewatch_display::{Compositor, DisplayBackend, FrameBuffer};
use telewatch_hal_rp2040::Rp2040SettingsFlash;
use telewatch_protocol::{CompanionMessage, Dictionary, WatchMessage};

use crate::channels::{TickCommand, WatchEvent, EVENTS, OUTBOX, TICK_CMD};
use crate::config;
use crate::display::MemoryLcd;
use crate::tasks::tick::{read_clock, set_clock};

/// The board's panel
pub type Panel = MemoryLcd<Spi<'static, SPI0, Blocking>, Output<'static>, Output<'static>, Delay>;

/// VCOM inversion period
const VCOM_PERIOD_MS: u64 = 1000;

/// Tick source that forwards subscriptions to the tick task
struct TickCommands;

impl TickSource for TickCommands {
    fn subscribe(&mut self, cadence: Cadence) {
        TICK_CMD.signal(TickCommand::Subscribe(cadence));
    }

    fn unsubscribe(&mut self) {
        TICK_CMD.signal(TickCommand::Unsubscribe);
    }
}

/// Everything the watchface task owns
struct Face {
    watchface: Watchface<Rp2040SettingsFlash<'static>>,
    compositor: Compositor,
    framebuffer: &'static mut FrameBuffer,
    panel: Panel,
    ticks: TickCommands,
    shown: bool,
}

impl Face {
    fn show(&mut self) {
        let now = match read_clock() {
            Ok(now) => now,
            Err(e) => {
                warn!("Cannot show window, RTC unreadable: {:?}", e);
                return;
            }
        };

        if let Err(e) = self.panel.set_enabled(true) {
            warn!("Panel enable failed: {:?}", e);
        }
        self.shown = true;
        let report = self
            .watchface
            .window_shown(now, &mut self.ticks, &mut self.compositor);
        log_report(&report);
        info!("Window shown");
    }

    fn hide(&mut self) {
        self.watchface.window_hidden(&mut self.ticks, &mut self.compositor);
        self.shown = false;

        if let Err(e) = self.panel.clear() {
            warn!("Panel clear failed: {:?}", e);
        }
        if let Err(e) = self.panel.set_enabled(false) {
            warn!("Panel disable failed: {:?}", e);
        }
        // The panel no longer shows what the shadow copy says
        self.framebuffer.invalidate();
        info!("Window hidden, {} bytes in use", self.compositor.used());
    }

    fn handle(&mut self, event: WatchEvent) {
        match event {
            WatchEvent::Tick(now) => {
                let report = self.watchface.tick(now, &mut self.compositor);
                log_report(&report);
            }
            WatchEvent::Button => {
                if self.shown {
                    self.hide();
                } else {
                    self.show();
                }
            }
            WatchEvent::Companion(message) => self.handle_companion(message),
        }
    }

    fn handle_companion(&mut self, message: CompanionMessage) {
        match message {
            CompanionMessage::Update(tuples) => {
                for tuple in tuples.iter() {
                    match self.watchface.apply_tuple(tuple, &mut self.ticks) {
                        Ok(applied) => {
                            debug!("Setting {:?} = {}", applied.key, applied.enabled);
                            if let Err(e) = applied.persisted {
                                warn!("Setting {:?} not persisted: {:?}", applied.key, e);
                            }
                        }
                        Err(e) => warn!("Rejected tuple: {:?}", e),
                    }
                }
            }
            CompanionMessage::SetClock(clock) => {
                let Ok(now) = WallTime::try_from(clock) else {
                    warn!("Rejected clock {:?}", clock);
                    return;
                };
                if let Err(e) = set_clock(&now) {
                    warn!("RTC set failed: {:?}", e);
                    return;
                }
                info!("Clock set to {:?}", now);
                let report =
                    self.watchface
                        .clock_changed(now, &mut self.ticks, &mut self.compositor);
                log_report(&report);
            }
            CompanionMessage::RequestSnapshot => {
                send_snapshot(self.watchface.snapshot());
            }
        }
    }

    /// Paint dirty layers and push changed lines to the panel
    fn render(&mut self) {
        if !self.shown {
            return;
        }
        // FrameBuffer drawing is infallible
        let _ = self.compositor.compose(
            self.watchface.elements(),
            self.watchface.now(),
            &mut *self.framebuffer,
        );
        match self.framebuffer.flush(&mut self.panel) {
            Ok(0) => {}
            Ok(lines) => trace!("Flushed {} lines", lines),
            Err(e) => warn!("Panel write failed: {:?}", e),
        }
    }
}

fn log_report(report: &TickReport) {
    if report.rebuilt {
        debug!("Elements rebuilt");
    }
    for omission in report.omitted.iter() {
        warn!("Omitted {:?}: {:?}", omission.kind, omission.error);
    }
}

/// Queue every setting for the companion
pub fn send_snapshot(snapshot: Dictionary) {
    if OUTBOX.try_send(WatchMessage::Snapshot(snapshot)).is_err() {
        warn!("Outbox full, dropping snapshot");
    }
}

/// Watchface task - shows the window at boot and handles events
#[embassy_executor::task]
pub async fn watchface_task(
    watchface: Watchface<Rp2040SettingsFlash<'static>>,
    framebuffer: &'static mut FrameBuffer,
    mut panel: Panel,
) {
    info!("Watchface task started");

    if let Err(e) = panel.init() {
        warn!("Panel init failed: {:?}", e);
    }

    let mut face = Face {
        watchface,
        compositor: Compositor::new(config::SURFACE_BUDGET_BYTES),
        framebuffer,
        panel,
        ticks: TickCommands,
        shown: false,
    };

    face.show();
    face.render();

    let mut vcom = Ticker::every(Duration::from_millis(VCOM_PERIOD_MS));

    loop {
        match select(EVENTS.receive(), vcom.next()).await {
            Either::First(event) => {
                face.handle(event);
                face.render();
            }
            Either::Second(()) => {
                if let Err(e) = face.panel.refresh() {
                    warn!("VCOM toggle failed: {:?}", e);
                }
            }
        }
    }
}
