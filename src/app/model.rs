use crate::config::{KeyboardConfig, ThemeMode};
use crate::editor::{SinkHandle, TextBuffer};
use crate::keyboard::{Key, KeyboardMode, Locale, RepeatDelete, ShiftState, layout};
use crate::observe::{Observers, SubscriptionId};

/// Keyboard-level change notifications for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardEvent {
    ModeChanged(KeyboardMode),
    ShiftChanged {
        /// `None` when the keyboard has no case switching.
        upper: Option<bool>,
        caps_locked: bool,
    },
}

/// A host text field the keyboard can type into.
#[derive(Debug, Clone)]
pub struct BoundField {
    pub name: String,
    pub sink: SinkHandle,
}

impl BoundField {
    pub fn new(name: impl Into<String>, sink: SinkHandle) -> Self {
        Self {
            name: name.into(),
            sink,
        }
    }
}

/// The complete keyboard session state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Text buffer bound to the active field
    pub buffer: TextBuffer,
    /// Active layout family
    pub mode: KeyboardMode,
    /// Shift / caps-lock state
    pub shift: ShiftState,
    /// Key rows locale
    pub locale: Locale,
    /// Chrome colors
    pub theme: ThemeMode,
    /// Fields available to bind the keyboard to
    pub fields: Vec<BoundField>,
    /// Index into `fields` of the bound field
    pub active_field: Option<usize>,
    /// Focused on-screen key as (row, column)
    pub focus: (usize, usize),
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    pub(super) repeat: RepeatDelete,
    observers: Observers<KeyboardEvent>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("buffer", &self.buffer)
            .field("mode", &self.mode)
            .field("shift", &self.shift)
            .field("locale", &self.locale)
            .field("active_field", &self.active_field)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a session with an empty, unbound buffer.
    pub fn new(config: &KeyboardConfig) -> Self {
        let shift = if config.case_switching {
            ShiftState::new(config.double_tap_ms)
        } else {
            ShiftState::disabled()
        };
        Self {
            buffer: TextBuffer::empty().with_policy(config.policy),
            mode: KeyboardMode::default(),
            shift,
            locale: config.locale,
            theme: config.theme,
            fields: Vec::new(),
            active_field: None,
            focus: (0, 0),
            help_visible: false,
            should_quit: false,
            repeat: RepeatDelete::new(config.repeat_delay_ms, config.repeat_interval_ms),
            observers: Observers::new(),
        }
    }

    /// Register host fields and bind the keyboard to the first one.
    pub fn with_fields(mut self, fields: Vec<BoundField>) -> Self {
        self.fields = fields;
        if let Some(first) = self.fields.first() {
            self.buffer.change_text_input(first.sink.clone());
            self.active_field = Some(0);
        }
        self
    }

    /// Key rows for the current locale, mode and shift capability.
    pub fn rows(&self) -> Vec<Vec<Key>> {
        layout(self.locale, self.mode, self.shift.is_enabled())
    }

    pub fn focused_key(&self) -> Option<Key> {
        let (row, col) = self.focus;
        self.rows().get(row).and_then(|keys| keys.get(col)).copied()
    }

    pub fn active_field_name(&self) -> Option<&str> {
        self.active_field
            .and_then(|idx| self.fields.get(idx))
            .map(|field| field.name.as_str())
    }

    /// Whether the delete key is currently held down.
    pub const fn delete_held(&self) -> bool {
        self.repeat.is_held()
    }

    /// Milliseconds until the next delete repeat, if one is pending.
    pub fn next_repeat_in(&self, now_ms: u64) -> Option<u64> {
        self.repeat.until_next(now_ms)
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&KeyboardEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub(super) fn notify(&mut self, event: KeyboardEvent) {
        self.observers.notify(&event);
    }

    pub(super) fn shift_snapshot(&self) -> KeyboardEvent {
        KeyboardEvent::ShiftChanged {
            upper: self.shift.is_upper_case(),
            caps_locked: self.shift.is_caps_locked(),
        }
    }

    /// Keep the focused key inside the current rows.
    pub(super) fn clamp_focus(&mut self) {
        let rows = self.rows();
        let row = self.focus.0.min(rows.len().saturating_sub(1));
        let width = rows.get(row).map_or(0, Vec::len);
        let col = self.focus.1.min(width.saturating_sub(1));
        self.focus = (row, col);
    }
}
