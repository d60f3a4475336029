//! The watchface value driven by lifecycle, settings and tick events

use heapless::Vec;
use telewatch_hal::SettingsStorage;
use telewatch_protocol::{Dictionary, SettingKey, Tuple};

use crate::format::format_date;
use crate::layout::{ElementSet, LayoutBuilder, Omission, MAX_ELEMENTS};
use crate::settings::{Applied, Settings, SettingsStore, UpdateError};
use crate::state::{Event, State};
use crate::time::WallTime;
use crate::traits::{Cadence, Surface, TickSource};

/// What one tick did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Tick arrived while the window was hidden
    pub ignored: bool,
    /// Element set was rebuilt
    pub rebuilt: bool,
    /// Elements the rebuild had to leave out
    pub omitted: Vec<Omission, MAX_ELEMENTS>,
    pub time_text: bool,
    pub date_text: bool,
    pub second_hand: bool,
    pub hands: bool,
}

/// Watchface state and the element set it renders
pub struct Watchface<S> {
    state: State,
    store: SettingsStore<S>,
    layout: LayoutBuilder,
    subscription: Option<Cadence>,
    now: Option<WallTime>,
}

impl<S: SettingsStorage> Watchface<S> {
    pub fn new(store: SettingsStore<S>) -> Self {
        Self {
            state: State::Uninitialized,
            store,
            layout: LayoutBuilder::new(),
            subscription: None,
            now: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    /// Live elements, if the window is shown
    pub fn elements(&self) -> Option<&ElementSet> {
        self.layout.elements()
    }

    /// Time of the most recent rendered tick
    pub fn now(&self) -> Option<&WallTime> {
        self.now.as_ref()
    }

    /// Cadence currently subscribed, if any
    pub fn subscription(&self) -> Option<Cadence> {
        self.subscription
    }

    pub fn is_dirty(&self) -> bool {
        self.state.needs_rebuild()
    }

    /// Every setting, for the companion
    pub fn snapshot(&self) -> Dictionary {
        self.store.export_all()
    }

    /// Window became visible: subscribe and render `now` immediately
    pub fn window_shown<T, U>(&mut self, now: WallTime, ticks: &mut T, surface: &mut U) -> TickReport
    where
        T: TickSource,
        U: Surface,
    {
        self.state = self.state.transition(Event::WindowShown);
        self.resubscribe(Some(self.settings().cadence()), ticks);
        self.tick(now, surface)
    }

    /// Window went away: unsubscribe and release every element
    pub fn window_hidden<T, U>(&mut self, ticks: &mut T, surface: &mut U)
    where
        T: TickSource,
        U: Surface,
    {
        self.resubscribe(None, ticks);
        self.layout.teardown(surface);
        self.now = None;
        self.state = self.state.transition(Event::WindowHidden);
    }

    /// Change one setting
    pub fn apply_setting<T: TickSource>(
        &mut self,
        key: SettingKey,
        enabled: bool,
        ticks: &mut T,
    ) -> Applied {
        let applied = self.store.apply(key, enabled);
        self.settings_applied(applied, ticks)
    }

    /// Change one setting from a companion tuple
    pub fn apply_tuple<T: TickSource>(
        &mut self,
        tuple: &Tuple,
        ticks: &mut T,
    ) -> Result<Applied, UpdateError> {
        let applied = self.store.apply_tuple(tuple)?;
        Ok(self.settings_applied(applied, ticks))
    }

    /// Wall clock jumped: rebuild and render `now`
    ///
    /// The current subscription is renewed so the source measures its next
    /// boundary from the new time.
    pub fn clock_changed<T, U>(
        &mut self,
        now: WallTime,
        ticks: &mut T,
        surface: &mut U,
    ) -> TickReport
    where
        T: TickSource,
        U: Surface,
    {
        if let Some(cadence) = self.subscription {
            ticks.subscribe(cadence);
        }
        self.state = self.state.transition(Event::ClockChanged);
        self.tick(now, surface)
    }

    /// Render one tick
    pub fn tick<U: Surface>(&mut self, now: WallTime, surface: &mut U) -> TickReport {
        let mut report = TickReport::default();
        self.state = self.state.transition(Event::Tick);
        if !self.state.accepts_ticks() {
            report.ignored = true;
            return report;
        }
        self.now = Some(now);

        if self.state.needs_rebuild() {
            let elements = self.layout.rebuild(self.store.settings(), surface);
            report.omitted = Vec::from_slice(elements.omitted()).unwrap_or_default();
            report.rebuilt = true;
            self.state = self.state.transition(Event::RebuildComplete);
        }

        let show_seconds = self.store.settings().show_seconds;
        let Some(elements) = self.layout.elements_mut() else {
            return report;
        };

        let time_format = elements.time_format();
        if let Some(time) = elements.time_mut() {
            time.set_text(&time_format.render(&now));
            surface.mark_dirty(time.layer());
            report.time_text = true;
        }

        if let Some(date) = elements.date_mut() {
            if !date.is_valid() || now.is_top_of_hour() {
                date.set_text(&format_date(&now));
                surface.mark_dirty(date.layer());
                report.date_text = true;
            }
        }

        if let Some(second_hand) = elements.second_hand() {
            surface.mark_dirty(second_hand.layer());
            report.second_hand = true;
        }

        if !show_seconds || now.second() == 0 {
            if let Some(hands) = elements.hands() {
                surface.mark_dirty(hands.layer());
                report.hands = true;
            }
        }

        report
    }

    fn settings_applied<T: TickSource>(&mut self, applied: Applied, ticks: &mut T) -> Applied {
        if applied.changed {
            self.state = self.state.transition(Event::SettingsChanged);
            if self.subscription.is_some() {
                self.resubscribe(Some(self.settings().cadence()), ticks);
            }
        }
        applied
    }

    /// Move from the current subscription to `wanted`
    fn resubscribe<T: TickSource>(&mut self, wanted: Option<Cadence>, ticks: &mut T) {
        if self.subscription == wanted {
            return;
        }
        if self.subscription.take().is_some() {
            ticks.unsubscribe();
        }
        if let Some(cadence) = wanted {
            ticks.subscribe(cadence);
            self.subscription = Some(cadence);
        }
    }

    /// Give back the settings store
    pub fn into_store(self) -> SettingsStore<S> {
        self.store
    }
}
