//! Keyboard state layered over the text buffer: layout mode, shift and
//! caps-lock, delete repeat, key definitions and locale rows.

pub mod accent;
mod layout;
mod mode;
mod repeat;
mod shift;

pub use layout::{Key, Locale, layout};
pub use mode::KeyboardMode;
pub use repeat::{DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_INTERVAL_MS, RepeatDelete};
pub use shift::{DEFAULT_DOUBLE_TAP_MS, ShiftCase, ShiftState};
