//! Keyboard session state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete session state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{BoundField, KeyboardEvent, Model};
pub use update::{Direction, Message, update};

use crate::config::KeyboardConfig;
use crate::editor::{FieldSink, SinkHandle, StringSink};

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug)]
pub struct App {
    config: KeyboardConfig,
    initial_text: String,
    enhanced_keys: bool,
}

impl App {
    /// Create a new application with the given keyboard settings.
    pub fn new(config: KeyboardConfig) -> Self {
        Self {
            config,
            initial_text: String::new(),
            enhanced_keys: false,
        }
    }

    /// Pre-fill the first field.
    pub fn with_initial_text(mut self, text: impl Into<String>) -> Self {
        self.initial_text = text.into();
        self
    }

    /// Build the session model with the demo fields.
    ///
    /// The first field tracks its own caret; the second is a plain string
    /// that only accepts wholesale replacement.
    pub fn build_model(&self) -> Model {
        let fields = vec![
            BoundField::new("note", SinkHandle::new(FieldSink::new(self.initial_text.clone()))),
            BoundField::new("title", SinkHandle::new(StringSink::default())),
        ];
        Model::new(&self.config).with_fields(fields)
    }
}
