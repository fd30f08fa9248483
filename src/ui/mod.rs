//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`style`]: Theming and colors
//! - bound fields with the text cursor, the key grid and the status bar

pub mod style;

mod overlays;
mod render;
mod status;

pub use render::{field_line, key_cell, render};
pub use status::status_text;

/// Rows taken by one bordered field.
pub const FIELD_HEIGHT: u16 = 3;
/// Minimum inner width of a key cap.
pub const KEY_MIN_WIDTH: usize = 1;
/// Inner width of the space bar.
pub const SPACE_KEY_WIDTH: usize = 24;
