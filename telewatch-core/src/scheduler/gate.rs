//! Boundary detection for a polled clock

use crate::time::WallTime;
use crate::traits::Cadence;

/// Turns clock samples into ticks at the subscribed cadence
///
/// A tick is due when a sample lands in a different second or minute than
/// the previous one. Every subscription change takes a fresh baseline,
/// so the first sample after it never fires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickGate {
    cadence: Option<Cadence>,
    last: Option<WallTime>,
}

impl TickGate {
    pub const fn new() -> Self {
        Self {
            cadence: None,
            last: None,
        }
    }

    pub const fn cadence(&self) -> Option<Cadence> {
        self.cadence
    }

    /// Start (or restart) delivering ticks, measured from `now`
    pub fn subscribe(&mut self, cadence: Cadence, now: Option<WallTime>) {
        self.cadence = Some(cadence);
        self.last = now;
    }

    pub fn unsubscribe(&mut self) {
        self.cadence = None;
        self.last = None;
    }

    /// Feed one clock sample; returns it when a tick is due
    pub fn poll(&mut self, now: WallTime) -> Option<WallTime> {
        let cadence = self.cadence?;
        let fire = self.last.is_some_and(|last| match cadence {
            Cadence::PerSecond => last.second_changed(&now),
            Cadence::PerMinute => last.minute_changed(&now),
        });
        self.last = Some(now);
        fire.then_some(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u8, minute: u8, second: u8) -> WallTime {
        WallTime::new(2024, 3, 7, hour, minute, second).unwrap()
    }

    #[test]
    fn test_unsubscribed_never_fires() {
        let mut gate = TickGate::new();
        assert_eq!(gate.poll(at(10, 0, 0)), None);
        assert_eq!(gate.poll(at(10, 1, 0)), None);
    }

    #[test]
    fn test_per_minute_fires_on_second_zero() {
        let mut gate = TickGate::new();
        gate.subscribe(Cadence::PerMinute, Some(at(10, 0, 58)));

        assert_eq!(gate.poll(at(10, 0, 58)), None);
        assert_eq!(gate.poll(at(10, 0, 59)), None);
        assert_eq!(gate.poll(at(10, 1, 0)), Some(at(10, 1, 0)));
        assert_eq!(gate.poll(at(10, 1, 0)), None);
    }

    #[test]
    fn test_per_second_fires_once_per_second() {
        let mut gate = TickGate::new();
        gate.subscribe(Cadence::PerSecond, Some(at(10, 0, 5)));

        assert_eq!(gate.poll(at(10, 0, 5)), None);
        assert_eq!(gate.poll(at(10, 0, 6)), Some(at(10, 0, 6)));
        assert_eq!(gate.poll(at(10, 0, 6)), None);
    }

    #[test]
    fn test_first_sample_without_baseline_does_not_fire() {
        let mut gate = TickGate::new();
        gate.subscribe(Cadence::PerMinute, None);

        assert_eq!(gate.poll(at(10, 0, 30)), None);
        assert_eq!(gate.poll(at(10, 1, 0)), Some(at(10, 1, 0)));
    }

    #[test]
    fn test_resubscribe_after_clock_jump_waits_for_next_minute() {
        let mut gate = TickGate::new();
        gate.subscribe(Cadence::PerMinute, Some(at(10, 0, 20)));
        assert_eq!(gate.poll(at(10, 0, 21)), None);

        // Clock set to 07:15:30 and the subscription renewed
        gate.subscribe(Cadence::PerMinute, Some(at(7, 15, 30)));
        assert_eq!(gate.poll(at(7, 15, 31)), None);
        assert_eq!(gate.poll(at(7, 15, 59)), None);
        assert_eq!(gate.poll(at(7, 16, 0)), Some(at(7, 16, 0)));
    }

    #[test]
    fn test_clock_jump_without_resubscribe_fires() {
        let mut gate = TickGate::new();
        gate.subscribe(Cadence::PerMinute, Some(at(10, 0, 20)));

        assert_eq!(gate.poll(at(7, 15, 31)), Some(at(7, 15, 31)));
    }

    #[test]
    fn test_unsubscribe_drops_baseline() {
        let mut gate = TickGate::new();
        gate.subscribe(Cadence::PerSecond, Some(at(10, 0, 0)));
        gate.unsubscribe();
        assert_eq!(gate.cadence(), None);
        assert_eq!(gate.poll(at(10, 0, 1)), None);

        gate.subscribe(Cadence::PerSecond, None);
        assert_eq!(gate.poll(at(10, 0, 2)), None);
    }
}
