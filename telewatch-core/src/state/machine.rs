//! State machine definition

use super::events::Event;

/// Display states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Window not shown; no elements exist and ticks are ignored
    #[default]
    Uninitialized,
    /// Element set is stale and is rebuilt on the next tick
    Rebuilding,
    /// Element set matches the settings
    Ready,
}

impl State {
    /// Check if ticks should be rendered
    pub fn accepts_ticks(&self) -> bool {
        !matches!(self, State::Uninitialized)
    }

    /// Check if the next tick must rebuild the element set
    pub fn needs_rebuild(&self) -> bool {
        matches!(self, State::Rebuilding)
    }

    /// Process an event and return the new state
    pub fn transition(self, event: Event) -> Self {
        match (self, event) {
            (_, Event::WindowHidden) => State::Uninitialized,
            (_, Event::WindowShown) => State::Rebuilding,

            // Changes while hidden are picked up by the rebuild on show
            (State::Ready, Event::SettingsChanged | Event::ClockChanged) => State::Rebuilding,

            (State::Rebuilding, Event::RebuildComplete) => State::Ready,

            // Ticks never change state by themselves
            (state, _) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_then_rebuild() {
        let state = State::Uninitialized.transition(Event::WindowShown);
        assert_eq!(state, State::Rebuilding);
        assert!(state.needs_rebuild());
        assert_eq!(state.transition(Event::RebuildComplete), State::Ready);
    }

    #[test]
    fn test_hidden_from_any_state() {
        for state in [State::Uninitialized, State::Rebuilding, State::Ready] {
            assert_eq!(state.transition(Event::WindowHidden), State::Uninitialized);
        }
    }

    #[test]
    fn test_invalidation_while_ready() {
        for event in [Event::SettingsChanged, Event::ClockChanged] {
            assert_eq!(State::Ready.transition(event), State::Rebuilding);
        }
    }

    #[test]
    fn test_uninitialized_ignores_everything_but_show() {
        for event in [
            Event::SettingsChanged,
            Event::ClockChanged,
            Event::Tick,
            Event::RebuildComplete,
        ] {
            assert_eq!(State::Uninitialized.transition(event), State::Uninitialized);
        }
        assert!(!State::Uninitialized.accepts_ticks());
    }

    #[test]
    fn test_tick_keeps_state() {
        assert_eq!(State::Ready.transition(Event::Tick), State::Ready);
        assert_eq!(State::Rebuilding.transition(Event::Tick), State::Rebuilding);
    }
}
