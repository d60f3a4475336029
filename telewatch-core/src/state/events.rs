//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Window pushed onto the screen
    WindowShown,
    /// Window removed or app stopping
    WindowHidden,

    // Invalidation events
    /// A setting value changed
    SettingsChanged,
    /// Wall clock was set to a new value
    ClockChanged,

    // Render events
    /// Tick delivered by the tick source
    Tick,
    /// Element set rebuilt from current settings
    RebuildComplete,
}
