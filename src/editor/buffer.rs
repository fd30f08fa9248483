use ropey::Rope;
use tracing::{debug, trace, warn};

use super::sink::SinkHandle;
use crate::keyboard::accent;
use crate::observe::{Observers, SubscriptionId};

/// How edits find their position in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPolicy {
    /// Insert and delete at the tracked cursor.
    #[default]
    CursorAware,
    /// Always append at the end and delete the last char. The cursor is
    /// pinned to the end of the text.
    Append,
}

/// Change notifications published by [`TextBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferEvent {
    /// The text changed; carries the new value and the cursor after the edit.
    ValueChanged { value: String, cursor: usize },
    /// Only the cursor moved.
    CursorMoved { cursor: usize },
}

#[derive(Debug, Clone, Copy)]
enum Edit<'a> {
    Insert { at: usize, text: &'a str },
    Remove { at: usize, len: usize },
}

/// The keyboard's text buffer.
///
/// Owns the text and a char-offset cursor, applies every edit, writes it
/// through to the active sink and notifies subscribers. No operation fails:
/// positions are clamped and impossible edits are no-ops.
pub struct TextBuffer {
    rope: Rope,
    cursor: usize,
    policy: EditPolicy,
    sink: Option<SinkHandle>,
    /// The sink was busy when attached; its text has not been loaded yet.
    pending_load: bool,
    observers: Observers<BufferEvent>,
}

impl TextBuffer {
    /// Create a buffer holding `text` with the cursor at its end.
    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let cursor = rope.len_chars();
        Self {
            rope,
            cursor,
            policy: EditPolicy::default(),
            sink: None,
            pending_load: false,
            observers: Observers::new(),
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Select the edit policy. `Append` moves the cursor to the end.
    pub fn with_policy(mut self, policy: EditPolicy) -> Self {
        self.policy = policy;
        if policy == EditPolicy::Append {
            self.cursor = self.len();
        }
        self
    }

    pub const fn policy(&self) -> EditPolicy {
        self.policy
    }

    /// The full text content of the buffer.
    pub fn value(&self) -> String {
        self.rope.to_string()
    }

    /// The cursor as a char offset.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a sink is attached.
    pub const fn has_text_input(&self) -> bool {
        self.sink.is_some()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&BufferEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Insert `text` at the cursor and move the cursor past it.
    ///
    /// Empty text leaves the value alone and only re-clamps the cursor.
    pub fn insert_text_at_cursor(&mut self, text: &str) {
        if !self.ensure_loaded() {
            return;
        }
        self.adopt_sink_cursor();
        if text.is_empty() {
            if self.clamp_cursor() {
                self.push_cursor();
                self.publish_cursor();
            }
            return;
        }
        let at = self.edit_point();
        self.apply(Edit::Insert { at, text });
        self.publish_value();
    }

    /// Delete the char before the cursor (Backspace).
    ///
    /// Returns `true` if a char was deleted.
    pub fn delete_backward(&mut self) -> bool {
        if !self.ensure_loaded() {
            return false;
        }
        self.adopt_sink_cursor();
        let at = self.edit_point();
        self.cursor = at;
        if at == 0 {
            return false;
        }
        self.apply(Edit::Remove { at: at - 1, len: 1 });
        self.publish_value();
        true
    }

    /// Replace the char before the cursor with its accented form.
    ///
    /// Chars without one are kept and followed by an apostrophe; with
    /// nothing before the cursor the apostrophe is inserted on its own.
    pub fn compose_accent(&mut self) {
        if !self.ensure_loaded() {
            return;
        }
        self.adopt_sink_cursor();
        let at = self.edit_point();
        let previous = at.checked_sub(1).map(|idx| self.rope.char(idx));
        let replacement = accent::compose(previous);
        let start = if previous.is_some() {
            self.apply(Edit::Remove { at: at - 1, len: 1 });
            at - 1
        } else {
            at
        };
        self.apply(Edit::Insert {
            at: start,
            text: &replacement,
        });
        self.publish_value();
    }

    /// Make `sink` the active text input and load its content.
    ///
    /// The cursor comes from the sink when it tracks one, otherwise it is
    /// placed at the end of the text. A sink that is borrowed elsewhere is
    /// attached but loaded on first use; edits are refused until then.
    pub fn change_text_input(&mut self, sink: SinkHandle) {
        let text = sink.text();
        self.sink = Some(sink);
        match text {
            Some(text) => {
                self.pending_load = false;
                self.load_sink_text(&text);
            }
            None => {
                warn!("new text input is busy; loading it on first use");
                self.pending_load = true;
            }
        }
    }

    /// Detach the active sink. The buffer keeps its text.
    pub fn detach_text_input(&mut self) -> Option<SinkHandle> {
        self.pending_load = false;
        let previous = self.sink.take();
        if previous.is_some() {
            debug!("text input detached");
        }
        previous
    }

    /// Reload the text from the sink after it was changed behind our back.
    pub fn resync_from_sink(&mut self) {
        if self.pending_load {
            self.ensure_loaded();
            return;
        }
        let Some(text) = self.sink.as_ref().and_then(SinkHandle::text) else {
            return;
        };
        if text == self.value() {
            let before = self.cursor;
            self.clamp_cursor();
            self.adopt_sink_cursor();
            if self.cursor != before {
                self.publish_cursor();
            }
            return;
        }
        self.rope = Rope::from_str(&text);
        if self.policy == EditPolicy::Append {
            self.cursor = self.len();
        }
        self.clamp_cursor();
        self.adopt_sink_cursor();
        self.publish_value();
    }

    /// Place the cursor at `position`, clamped to the text.
    pub fn set_cursor(&mut self, position: usize) {
        if !self.ensure_loaded() {
            return;
        }
        let target = match self.policy {
            EditPolicy::CursorAware => position.min(self.len()),
            EditPolicy::Append => self.len(),
        };
        if target == self.cursor {
            return;
        }
        self.cursor = target;
        self.push_cursor();
        self.publish_cursor();
    }

    pub fn move_cursor_left(&mut self) {
        if !self.ensure_loaded() {
            return;
        }
        self.adopt_sink_cursor();
        self.set_cursor(self.cursor.saturating_sub(1));
    }

    pub fn move_cursor_right(&mut self) {
        if !self.ensure_loaded() {
            return;
        }
        self.adopt_sink_cursor();
        self.set_cursor(self.cursor.saturating_add(1));
    }

    pub fn move_cursor_to_start(&mut self) {
        self.set_cursor(0);
    }

    pub fn move_cursor_to_end(&mut self) {
        if self.ensure_loaded() {
            self.set_cursor(self.len());
        }
    }

    // --- Private helpers ---

    /// Replace the text with the sink's and place the cursor for a swap.
    fn load_sink_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        let len = self.len();
        let caret = self.sink.as_ref().and_then(SinkHandle::cursor_position);
        self.cursor = match (self.policy, caret) {
            (EditPolicy::CursorAware, Some(position)) => position.min(len),
            _ => len,
        };
        debug!(chars = len, cursor = self.cursor, "text input changed");
        self.push_cursor();
        self.publish_value();
    }

    /// Finish a deferred load. Returns `false` while the sink is still busy.
    fn ensure_loaded(&mut self) -> bool {
        if !self.pending_load {
            return true;
        }
        let Some(text) = self.sink.as_ref().and_then(SinkHandle::text) else {
            warn!("text input still busy; operation skipped");
            return false;
        };
        self.pending_load = false;
        self.load_sink_text(&text);
        true
    }

    /// Where the next edit happens under the current policy.
    fn edit_point(&self) -> usize {
        match self.policy {
            EditPolicy::CursorAware => self.cursor.min(self.len()),
            EditPolicy::Append => self.len(),
        }
    }

    /// Returns `true` if the cursor had to move.
    fn clamp_cursor(&mut self) -> bool {
        let clamped = self.edit_point();
        let changed = clamped != self.cursor;
        self.cursor = clamped;
        changed
    }

    /// Follow the caret of a cursor-aware sink, which the host may move.
    fn adopt_sink_cursor(&mut self) {
        if self.policy != EditPolicy::CursorAware {
            return;
        }
        if let Some(position) = self.sink.as_ref().and_then(SinkHandle::cursor_position) {
            self.cursor = position.min(self.len());
        }
    }

    fn apply(&mut self, edit: Edit<'_>) {
        match edit {
            Edit::Insert { at, text } => {
                self.rope.insert(at, text);
                self.cursor = at + text.chars().count();
                trace!(at, text, cursor = self.cursor, "insert");
            }
            Edit::Remove { at, len } => {
                self.rope.remove(at..at + len);
                self.cursor = at;
                trace!(at, len, cursor = self.cursor, "remove");
            }
        }
        self.propagate(edit);
    }

    fn propagate(&self, edit: Edit<'_>) {
        let Some(sink) = &self.sink else {
            return;
        };
        let Ok(mut target) = sink.cell().try_borrow_mut() else {
            warn!(?edit, "text input is borrowed elsewhere; edit not propagated");
            return;
        };
        if self.policy == EditPolicy::CursorAware {
            if let Some(field) = target.cursor_aware() {
                match edit {
                    Edit::Insert { at, text } => field.insert_text(text, at),
                    Edit::Remove { at, len } => field.delete_text(at, len),
                }
                field.set_cursor_position(self.cursor);
                return;
            }
        }
        target.replace_all(&self.rope.to_string());
    }

    fn push_cursor(&self) {
        if self.policy != EditPolicy::CursorAware {
            return;
        }
        let Some(sink) = &self.sink else {
            return;
        };
        if let Ok(mut target) = sink.cell().try_borrow_mut() {
            if let Some(field) = target.cursor_aware() {
                field.set_cursor_position(self.cursor);
            }
        }
    }

    fn publish_value(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let event = BufferEvent::ValueChanged {
            value: self.rope.to_string(),
            cursor: self.cursor,
        };
        self.observers.notify(&event);
    }

    fn publish_cursor(&mut self) {
        let event = BufferEvent::CursorMoved {
            cursor: self.cursor,
        };
        self.observers.notify(&event);
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("rope", &format_args!("Rope({} chars)", self.rope.len_chars()))
            .field("cursor", &self.cursor)
            .field("policy", &self.policy)
            .field("sink", &self.sink)
            .field("pending_load", &self.pending_load)
            .field("observers", &self.observers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::editor::sink::{CursorSink, FieldSink, StringSink, TextSink};

    fn buffer_at(text: &str, cursor: usize) -> TextBuffer {
        let mut buf = TextBuffer::from_text(text);
        buf.set_cursor(cursor);
        buf
    }

    fn recorded(buf: &mut TextBuffer) -> Rc<RefCell<Vec<BufferEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        buf.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    // --- Construction ---

    #[test]
    fn test_from_text_places_cursor_at_end() {
        let buf = TextBuffer::from_text("hello");
        assert_eq!(buf.value(), "hello");
        assert_eq!(buf.cursor(), 5);
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn test_empty_buffer() {
        let buf = TextBuffer::empty();
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), 0);
        assert!(!buf.has_text_input());
    }

    // --- Insertion ---

    #[test]
    fn test_insert_in_middle_advances_cursor() {
        let mut buf = buffer_at("hlo", 1);
        buf.insert_text_at_cursor("el");
        assert_eq!(buf.value(), "hello");
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn test_insert_at_start() {
        let mut buf = buffer_at("ello", 0);
        buf.insert_text_at_cursor("H");
        assert_eq!(buf.value(), "Hello");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn test_insert_counts_chars_not_bytes() {
        let mut buf = buffer_at("caf", 3);
        buf.insert_text_at_cursor("é!");
        assert_eq!(buf.value(), "café!");
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn test_insert_empty_is_noop() {
        let mut buf = buffer_at("hello", 2);
        let events = recorded(&mut buf);
        buf.insert_text_at_cursor("");
        assert_eq!(buf.value(), "hello");
        assert_eq!(buf.cursor(), 2);
        assert!(events.borrow().is_empty());
    }

    // --- Backspace ---

    #[test]
    fn test_delete_backward_at_start_is_noop() {
        let mut buf = buffer_at("abc", 0);
        assert!(!buf.delete_backward());
        assert_eq!(buf.value(), "abc");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_delete_backward_at_end() {
        let mut buf = TextBuffer::from_text("abc");
        assert!(buf.delete_backward());
        assert_eq!(buf.value(), "ab");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_delete_backward_in_middle() {
        let mut buf = buffer_at("abc", 2);
        buf.delete_backward();
        assert_eq!(buf.value(), "ac");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn test_delete_backward_multibyte() {
        let mut buf = TextBuffer::from_text("café");
        buf.delete_backward();
        assert_eq!(buf.value(), "caf");
    }

    #[test]
    fn test_delete_backward_on_empty_buffer() {
        let mut buf = TextBuffer::empty();
        assert!(!buf.delete_backward());
        assert!(buf.is_empty());
    }

    // --- Accent composition ---

    #[test]
    fn test_accent_replaces_vowel_before_cursor() {
        let mut buf = TextBuffer::from_text("la");
        buf.compose_accent();
        assert_eq!(buf.value(), "là");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_accent_on_consonant_appends_apostrophe() {
        let mut buf = TextBuffer::from_text("hz");
        buf.compose_accent();
        assert_eq!(buf.value(), "hz’");
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn test_accent_in_middle_of_text() {
        let mut buf = buffer_at("cafe noir", 4);
        buf.compose_accent();
        assert_eq!(buf.value(), "café noir");
        assert_eq!(buf.cursor(), 4);
    }

    #[test]
    fn test_accent_at_start_inserts_apostrophe() {
        let mut buf = buffer_at("abc", 0);
        buf.compose_accent();
        assert_eq!(buf.value(), "’abc");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn test_accent_publishes_single_value_change() {
        let mut buf = TextBuffer::from_text("garcon");
        buf.set_cursor(4);
        let events = recorded(&mut buf);
        buf.compose_accent();
        assert_eq!(
            *events.borrow(),
            vec![BufferEvent::ValueChanged {
                value: "garçon".to_string(),
                cursor: 4,
            }]
        );
    }

    // --- Cursor placement ---

    #[test]
    fn test_set_cursor_clamps() {
        let mut buf = buffer_at("hello", 100);
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn test_move_cursor_left_and_right_stop_at_edges() {
        let mut buf = buffer_at("ab", 0);
        buf.move_cursor_left();
        assert_eq!(buf.cursor(), 0);
        buf.move_cursor_right();
        buf.move_cursor_right();
        buf.move_cursor_right();
        assert_eq!(buf.cursor(), 2);
        buf.move_cursor_to_start();
        assert_eq!(buf.cursor(), 0);
        buf.move_cursor_to_end();
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_cursor_move_is_published() {
        let mut buf = TextBuffer::from_text("ab");
        let events = recorded(&mut buf);
        buf.move_cursor_left();
        buf.move_cursor_to_end();
        buf.move_cursor_to_end();
        assert_eq!(
            *events.borrow(),
            vec![
                BufferEvent::CursorMoved { cursor: 1 },
                BufferEvent::CursorMoved { cursor: 2 },
            ]
        );
    }

    // --- Append policy ---

    #[test]
    fn test_append_policy_ignores_cursor() {
        let mut buf = TextBuffer::from_text("ab").with_policy(EditPolicy::Append);
        buf.set_cursor(0);
        assert_eq!(buf.cursor(), 2);
        buf.insert_text_at_cursor("c");
        assert_eq!(buf.value(), "abc");
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn test_append_policy_deletes_last_char() {
        let mut buf = TextBuffer::from_text("abc").with_policy(EditPolicy::Append);
        buf.move_cursor_left();
        assert!(buf.delete_backward());
        assert_eq!(buf.value(), "ab");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_append_policy_accent_uses_last_char() {
        let mut buf = TextBuffer::from_text("do").with_policy(EditPolicy::Append);
        buf.compose_accent();
        assert_eq!(buf.value(), "dô");
    }

    // --- Sinks ---

    #[test]
    fn test_plain_sink_receives_whole_value() {
        let shared = Rc::new(RefCell::new(StringSink::new("hi")));
        let mut buf = TextBuffer::empty();
        buf.change_text_input(SinkHandle::from_shared(shared.clone()));
        assert_eq!(buf.value(), "hi");
        assert_eq!(buf.cursor(), 2);

        buf.insert_text_at_cursor("!");
        assert_eq!(shared.borrow().as_str(), "hi!");
        buf.move_cursor_to_start();
        buf.delete_backward();
        assert_eq!(shared.borrow().as_str(), "hi!");
        buf.move_cursor_to_end();
        buf.delete_backward();
        assert_eq!(shared.borrow().as_str(), "hi");
    }

    #[test]
    fn test_cursor_aware_sink_receives_positional_edits() {
        let field = Rc::new(RefCell::new(FieldSink::with_caret("hllo", 1)));
        let mut buf = TextBuffer::empty();
        buf.change_text_input(SinkHandle::from_shared(field.clone()));
        assert_eq!(buf.cursor(), 1);

        buf.insert_text_at_cursor("e");
        assert_eq!(field.borrow().as_str(), "hello");
        assert_eq!(field.borrow().caret(), 2);

        buf.delete_backward();
        assert_eq!(field.borrow().as_str(), "hllo");
        assert_eq!(field.borrow().caret(), 1);
    }

    #[test]
    fn test_buffer_follows_caret_moved_by_host() {
        let field = Rc::new(RefCell::new(FieldSink::new("world")));
        let mut buf = TextBuffer::empty();
        buf.change_text_input(SinkHandle::from_shared(field.clone()));

        field.borrow_mut().set_cursor_position(0);
        buf.insert_text_at_cursor("hello ");
        assert_eq!(buf.value(), "hello world");
        assert_eq!(buf.cursor(), 6);
        assert_eq!(field.borrow().as_str(), "hello world");
    }

    #[test]
    fn test_change_text_input_replaces_value_and_resets_cursor() {
        let mut buf = TextBuffer::from_text("old");
        let events = recorded(&mut buf);
        buf.change_text_input(SinkHandle::new(StringSink::new("brand new")));
        assert_eq!(buf.value(), "brand new");
        assert_eq!(buf.cursor(), 9);
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_swapping_sinks_writes_only_to_active_one() {
        let first = Rc::new(RefCell::new(StringSink::new("a")));
        let second = Rc::new(RefCell::new(StringSink::new("b")));
        let mut buf = TextBuffer::empty();
        buf.change_text_input(SinkHandle::from_shared(first.clone()));
        buf.insert_text_at_cursor("1");
        buf.change_text_input(SinkHandle::from_shared(second.clone()));
        buf.insert_text_at_cursor("2");
        assert_eq!(first.borrow().as_str(), "a1");
        assert_eq!(second.borrow().as_str(), "b2");
    }

    #[test]
    fn test_detach_keeps_text() {
        let mut buf = TextBuffer::empty();
        buf.change_text_input(SinkHandle::new(StringSink::new("keep")));
        assert!(buf.detach_text_input().is_some());
        assert!(buf.detach_text_input().is_none());
        buf.insert_text_at_cursor("!");
        assert_eq!(buf.value(), "keep!");
    }

    #[test]
    fn test_resync_after_out_of_band_change_clamps_cursor() {
        let shared = Rc::new(RefCell::new(StringSink::new("longer text")));
        let mut buf = TextBuffer::empty();
        buf.change_text_input(SinkHandle::from_shared(shared.clone()));
        shared.borrow_mut().replace_all("tiny");
        buf.resync_from_sink();
        assert_eq!(buf.value(), "tiny");
        assert_eq!(buf.cursor(), 4);
    }

    #[test]
    fn test_borrowed_sink_does_not_panic() {
        let shared = Rc::new(RefCell::new(StringSink::new("x")));
        let mut buf = TextBuffer::empty();
        buf.change_text_input(SinkHandle::from_shared(shared.clone()));
        let guard = shared.borrow_mut();
        buf.insert_text_at_cursor("y");
        drop(guard);
        assert_eq!(buf.value(), "xy");
        assert_eq!(shared.borrow().as_str(), "x");
    }

    #[test]
    fn test_busy_sink_is_loaded_before_first_edit() {
        let shared = Rc::new(RefCell::new(StringSink::new("host content")));
        let mut buf = TextBuffer::from_text("old text");
        let guard = shared.borrow_mut();
        buf.change_text_input(SinkHandle::from_shared(shared.clone()));
        drop(guard);

        buf.insert_text_at_cursor("!");
        assert_eq!(buf.value(), "host content!");
        assert_eq!(shared.borrow().as_str(), "host content!");
    }

    #[test]
    fn test_edits_refused_while_new_sink_stays_busy() {
        let shared = Rc::new(RefCell::new(FieldSink::new("host")));
        let mut buf = TextBuffer::from_text("old");
        let events = recorded(&mut buf);
        let guard = shared.borrow_mut();
        buf.change_text_input(SinkHandle::from_shared(shared.clone()));

        buf.insert_text_at_cursor("!");
        assert!(!buf.delete_backward());
        buf.compose_accent();
        buf.move_cursor_left();
        assert_eq!(buf.value(), "old");
        assert!(events.borrow().is_empty());
        drop(guard);

        assert_eq!(shared.borrow().as_str(), "host");
        buf.resync_from_sink();
        assert_eq!(buf.value(), "host");
        assert_eq!(buf.cursor(), 4);
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_resync_with_unchanged_text_follows_host_caret() {
        let field = Rc::new(RefCell::new(FieldSink::new("hello")));
        let mut buf = TextBuffer::empty();
        buf.change_text_input(SinkHandle::from_shared(field.clone()));
        let events = recorded(&mut buf);

        field.borrow_mut().set_cursor_position(2);
        buf.resync_from_sink();
        assert_eq!(buf.cursor(), 2);
        assert_eq!(*events.borrow(), vec![BufferEvent::CursorMoved { cursor: 2 }]);

        buf.resync_from_sink();
        assert_eq!(events.borrow().len(), 1);
    }

    // --- Complex editing sequences ---

    #[test]
    fn test_type_then_backspace_then_type() {
        let mut buf = TextBuffer::empty();
        for ch in ["h", "e", "l"] {
            buf.insert_text_at_cursor(ch);
        }
        buf.delete_backward();
        buf.insert_text_at_cursor("l");
        buf.insert_text_at_cursor("p");
        assert_eq!(buf.value(), "help");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn insert_splices_text_at_cursor(
                s in "\\PC{0,24}",
                t in "\\PC{0,8}",
                p in 0..32usize,
            ) {
                let len = s.chars().count();
                let p = p.min(len);
                let mut buf = buffer_at(&s, p);
                buf.insert_text_at_cursor(&t);

                let head: String = s.chars().take(p).collect();
                let tail: String = s.chars().skip(p).collect();
                prop_assert_eq!(buf.value(), format!("{head}{t}{tail}"));
                prop_assert_eq!(buf.cursor(), p + t.chars().count());
            }

            #[test]
            fn cursor_never_exceeds_length(
                s in "[a-z]{0,16}",
                ops in proptest::collection::vec(0..4u8, 0..40),
            ) {
                let mut buf = TextBuffer::from_text(&s);
                for op in ops {
                    match op {
                        0 => buf.insert_text_at_cursor("x"),
                        1 => { buf.delete_backward(); }
                        2 => buf.move_cursor_left(),
                        _ => buf.compose_accent(),
                    }
                    prop_assert!(buf.cursor() <= buf.len());
                }
            }
        }
    }
}
