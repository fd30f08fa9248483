/// Default hold time before the delete key starts repeating.
pub const DEFAULT_REPEAT_DELAY_MS: u64 = 500;
/// Default time between repeats once repeating.
pub const DEFAULT_REPEAT_INTERVAL_MS: u64 = 100;

/// Press-and-hold repeat timer for the delete key.
///
/// Driven by the event loop's tick rather than a thread: the loop asks
/// [`RepeatDelete::take_due`] how many repeats elapsed since it last asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatDelete {
    delay_ms: u64,
    interval_ms: u64,
    /// Time of the next repeat while the key is held.
    next_fire_ms: Option<u64>,
}

impl RepeatDelete {
    pub const fn new(delay_ms: u64, interval_ms: u64) -> Self {
        Self {
            delay_ms,
            // A zero interval would repeat unboundedly within one tick.
            interval_ms: if interval_ms == 0 { 1 } else { interval_ms },
            next_fire_ms: None,
        }
    }

    /// Start holding. Re-arms if already held, so one timer is active.
    pub const fn press(&mut self, now_ms: u64) {
        self.next_fire_ms = Some(now_ms.saturating_add(self.delay_ms));
    }

    pub const fn release(&mut self) {
        self.next_fire_ms = None;
    }

    pub const fn is_held(&self) -> bool {
        self.next_fire_ms.is_some()
    }

    /// Number of repeats that fired up to `now_ms`.
    pub fn take_due(&mut self, now_ms: u64) -> u32 {
        let Some(mut next) = self.next_fire_ms else {
            return 0;
        };
        let mut fired = 0u32;
        while next <= now_ms {
            fired = fired.saturating_add(1);
            next = next.saturating_add(self.interval_ms);
        }
        self.next_fire_ms = Some(next);
        fired
    }

    /// Milliseconds until the next repeat, for sizing the event poll timeout.
    pub fn until_next(&self, now_ms: u64) -> Option<u64> {
        self.next_fire_ms.map(|next| next.saturating_sub(now_ms))
    }
}

impl Default for RepeatDelete {
    fn default() -> Self {
        Self::new(DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_timer_never_fires() {
        let mut timer = RepeatDelete::default();
        assert_eq!(timer.take_due(10_000), 0);
        assert!(!timer.is_held());
    }

    #[test]
    fn test_nothing_fires_before_delay() {
        let mut timer = RepeatDelete::new(500, 100);
        timer.press(1_000);
        assert_eq!(timer.take_due(1_499), 0);
        assert_eq!(timer.take_due(1_500), 1);
    }

    #[test]
    fn test_fires_every_interval_after_delay() {
        let mut timer = RepeatDelete::new(500, 100);
        timer.press(0);
        assert_eq!(timer.take_due(500), 1);
        assert_eq!(timer.take_due(599), 0);
        assert_eq!(timer.take_due(600), 1);
        assert_eq!(timer.take_due(900), 3);
    }

    #[test]
    fn test_release_cancels() {
        let mut timer = RepeatDelete::new(500, 100);
        timer.press(0);
        timer.release();
        assert_eq!(timer.take_due(5_000), 0);
    }

    #[test]
    fn test_press_while_held_rearms_single_timer() {
        let mut timer = RepeatDelete::new(500, 100);
        timer.press(0);
        timer.press(400);
        assert_eq!(timer.take_due(899), 0);
        assert_eq!(timer.take_due(900), 1);
    }

    #[test]
    fn test_until_next() {
        let mut timer = RepeatDelete::new(500, 100);
        assert_eq!(timer.until_next(0), None);
        timer.press(0);
        assert_eq!(timer.until_next(200), Some(300));
        assert_eq!(timer.until_next(800), Some(0));
    }
}
