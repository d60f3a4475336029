//! Tick source trait

/// How often the tick source delivers time values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cadence {
    /// Once per minute, on second 0
    PerMinute,
    /// Once per second
    PerSecond,
}

impl Cadence {
    /// Cadence needed to animate (or not) a second hand
    pub const fn for_seconds(show_seconds: bool) -> Self {
        if show_seconds {
            Cadence::PerSecond
        } else {
            Cadence::PerMinute
        }
    }
}

/// Periodic time delivery
///
/// Subscribing replaces any previous subscription on the source side and
/// measures the next boundary from the time of the call. The watchface
/// still unsubscribes first when switching cadence.
pub trait TickSource {
    fn subscribe(&mut self, cadence: Cadence);
    fn unsubscribe(&mut self);
}

impl<T: TickSource + ?Sized> TickSource for &mut T {
    fn subscribe(&mut self, cadence: Cadence) {
        (**self).subscribe(cadence)
    }

    fn unsubscribe(&mut self) {
        (**self).unsubscribe()
    }
}
