//! Shift and caps-lock state machine.
//!
//! Timestamps are milliseconds on the event loop's monotonic clock.

use tracing::debug;

/// Default window for two taps to count as a double tap.
pub const DEFAULT_DOUBLE_TAP_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftCase {
    #[default]
    Lower,
    Upper,
    CapsLocked,
}

impl ShiftCase {
    pub const fn is_upper(self) -> bool {
        matches!(self, Self::Upper | Self::CapsLocked)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tap {
    at_ms: u64,
    /// Latch state before the tap, so a double tap toggles relative to it.
    was_locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftState {
    enabled: bool,
    case: ShiftCase,
    double_tap_ms: u64,
    last_tap: Option<Tap>,
}

impl ShiftState {
    pub const fn new(double_tap_ms: u64) -> Self {
        Self {
            enabled: true,
            case: ShiftCase::Lower,
            double_tap_ms,
            last_tap: None,
        }
    }

    /// A layout without case switching; there is no shift key.
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            case: ShiftCase::Lower,
            double_tap_ms: DEFAULT_DOUBLE_TAP_MS,
            last_tap: None,
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub const fn case(&self) -> ShiftCase {
        self.case
    }

    /// `None` when case switching does not apply to this keyboard.
    pub const fn is_upper_case(&self) -> Option<bool> {
        if self.enabled {
            Some(self.case.is_upper())
        } else {
            None
        }
    }

    pub const fn is_caps_locked(&self) -> bool {
        matches!(self.case, ShiftCase::CapsLocked)
    }

    /// Handle a shift key tap at `now_ms`.
    pub fn tap(&mut self, now_ms: u64) {
        if !self.enabled {
            return;
        }
        let double = self
            .last_tap
            .is_some_and(|tap| now_ms.saturating_sub(tap.at_ms) <= self.double_tap_ms);

        if double {
            let was_locked = self.last_tap.is_some_and(|tap| tap.was_locked);
            self.case = if was_locked {
                ShiftCase::Lower
            } else {
                ShiftCase::CapsLocked
            };
            self.last_tap = None;
            debug!(caps_locked = self.is_caps_locked(), "caps lock toggled");
            return;
        }

        self.last_tap = Some(Tap {
            at_ms: now_ms,
            was_locked: self.is_caps_locked(),
        });
        self.case = match self.case {
            ShiftCase::Lower => ShiftCase::Upper,
            ShiftCase::Upper | ShiftCase::CapsLocked => ShiftCase::Lower,
        };
    }

    /// Auto shift-off after a char was typed in transient upper case.
    pub fn character_inserted(&mut self) {
        if self.case == ShiftCase::Upper {
            self.case = ShiftCase::Lower;
        }
        self.last_tap = None;
    }

    /// Apply the current case to a typed letter.
    pub fn apply(&self, ch: char) -> String {
        if self.enabled && self.case.is_upper() {
            ch.to_uppercase().collect()
        } else {
            ch.to_string()
        }
    }
}

impl Default for ShiftState {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_MS)
    }
}
