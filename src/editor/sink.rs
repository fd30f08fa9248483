//! External text destinations the buffer writes through to.
//!
//! A sink is whatever actually displays the text: a host text field, or a
//! plain string owned by the caller. The buffer only talks to the narrow
//! [`TextSink`] interface; sinks that track their own caret additionally
//! implement [`CursorSink`] and expose it through [`TextSink::cursor_aware`].
//!
//! All offsets are char offsets.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Minimal capability every sink provides.
pub trait TextSink {
    /// The text the sink currently holds.
    fn current_text(&self) -> String;

    /// Replace the sink's whole content.
    fn replace_all(&mut self, text: &str);

    /// The cursor-aware extension, if this sink supports it.
    fn cursor_aware(&mut self) -> Option<&mut dyn CursorSink> {
        None
    }
}

/// Optional extension for sinks that keep their own caret.
pub trait CursorSink {
    fn cursor_position(&self) -> usize;
    fn set_cursor_position(&mut self, position: usize);
    fn insert_text(&mut self, text: &str, at: usize);
    fn delete_text(&mut self, at: usize, len: usize);
}

/// Shared, swappable reference to a sink.
///
/// The buffer holds one of these but never owns the sink's lifetime: the
/// host keeps its own clone and reads the text back from it.
#[derive(Clone)]
pub struct SinkHandle(Rc<RefCell<dyn TextSink>>);

impl SinkHandle {
    pub fn new(sink: impl TextSink + 'static) -> Self {
        Self(Rc::new(RefCell::new(sink)))
    }

    /// Wrap a sink the caller already shares.
    pub fn from_shared(sink: Rc<RefCell<dyn TextSink>>) -> Self {
        Self(sink)
    }

    pub(crate) fn cell(&self) -> &RefCell<dyn TextSink> {
        &self.0
    }

    /// Snapshot of the sink's text, or `None` while it is mutably borrowed.
    pub fn text(&self) -> Option<String> {
        self.0.try_borrow().ok().map(|sink| sink.current_text())
    }

    /// The sink's own caret, for cursor-aware sinks.
    pub fn cursor_position(&self) -> Option<usize> {
        let mut sink = self.0.try_borrow_mut().ok()?;
        let position = sink.cursor_aware().map(|cursor| cursor.cursor_position());
        position
    }

    /// Whether two handles point at the same sink.
    pub fn same_sink(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SinkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text() {
            Some(text) => f
                .debug_struct("SinkHandle")
                .field("chars", &text.chars().count())
                .finish(),
            None => f.write_str("SinkHandle(<borrowed>)"),
        }
    }
}

/// A caller-supplied string. Only supports wholesale replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSink {
    text: String,
}

impl StringSink {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl TextSink for StringSink {
    fn current_text(&self) -> String {
        self.text.clone()
    }

    fn replace_all(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }
}

/// A text field with its own caret, as a host toolkit would expose it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSink {
    text: String,
    caret: usize,
}

impl FieldSink {
    /// Create a field with the caret at the end of `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        Self { text, caret }
    }

    /// Create a field with the caret at `caret`, clamped to the text.
    pub fn with_caret(text: impl Into<String>, caret: usize) -> Self {
        let mut field = Self::new(text);
        field.set_cursor_position(caret);
        field
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub const fn caret(&self) -> usize {
        self.caret
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(byte, _)| byte)
    }
}

impl TextSink for FieldSink {
    fn current_text(&self) -> String {
        self.text.clone()
    }

    fn replace_all(&mut self, text: &str) {
        text.clone_into(&mut self.text);
        self.caret = self.caret.min(self.char_count());
    }

    fn cursor_aware(&mut self) -> Option<&mut dyn CursorSink> {
        Some(self)
    }
}

impl CursorSink for FieldSink {
    fn cursor_position(&self) -> usize {
        self.caret
    }

    fn set_cursor_position(&mut self, position: usize) {
        self.caret = position.min(self.char_count());
    }

    fn insert_text(&mut self, text: &str, at: usize) {
        let at = at.min(self.char_count());
        let byte = self.byte_offset(at);
        self.text.insert_str(byte, text);
    }

    fn delete_text(&mut self, at: usize, len: usize) {
        let total = self.char_count();
        let start = at.min(total);
        let end = at.saturating_add(len).min(total);
        let start_byte = self.byte_offset(start);
        let end_byte = self.byte_offset(end);
        self.text.replace_range(start_byte..end_byte, "");
        self.caret = self.caret.min(self.char_count());
    }
}
