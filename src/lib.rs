// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditPolicy)
    clippy::module_name_repetitions
)]

//! # Softboard
//!
//! An on-screen software keyboard for the terminal.
//!
//! Softboard types into host text fields through a cursor-aware buffer:
//! - Insert and delete at the cursor, mirrored into the bound field
//! - Shift, caps lock and letters / numbers / symbols layouts
//! - French accent composition
//! - Press-and-hold delete with repeat
//!
//! ## Architecture
//!
//! Softboard uses The Elm Architecture (TEA) pattern:
//! - **Model**: Keyboard session state
//! - **Message**: Key presses, ticks and host events
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Text buffer and text sinks
//! - [`keyboard`]: Layouts, shift state, accents and key repeat
//! - [`observe`]: Change subscriptions
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved defaults and flag parsing

pub mod app;
pub mod config;
pub mod editor;
pub mod keyboard;
pub mod observe;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{SinkHandle, TextBuffer, TextSink};
    pub use crate::keyboard::{Key, KeyboardMode};
}
