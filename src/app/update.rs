use tracing::debug;

use crate::app::Model;
use crate::app::model::KeyboardEvent;
use crate::editor::SinkHandle;
use crate::keyboard::{Key, KeyboardMode};

/// Direction for moving the on-screen key focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// All possible events and actions in the application.
///
/// These represent key presses, timer ticks and host events.
/// Timestamps are milliseconds on the event loop's monotonic clock.
#[derive(Debug, Clone)]
pub enum Message {
    // Keys
    /// Press an on-screen key
    PressKey(Key, u64),
    /// Insert text at the cursor as-is (paste)
    InsertText(String),
    /// Delete the char before the cursor once
    DeleteBackward,
    /// Delete key went down: delete once and start the repeat timer
    DeleteHoldStart(u64),
    /// Delete key went up: stop repeating
    DeleteHoldEnd,
    /// Event loop tick, fires due delete repeats
    Tick(u64),

    // Cursor
    /// Move cursor one char left
    MoveCursorLeft,
    /// Move cursor one char right
    MoveCursorRight,
    /// Move cursor to start of text (Home)
    MoveCursorToStart,
    /// Move cursor to end of text (End)
    MoveCursorToEnd,

    // Text input binding
    /// Bind the keyboard to another sink
    ChangeTextInput(SinkHandle),
    /// Bind the keyboard to the next registered field
    NextField,

    // On-screen key focus
    /// Move focus across the key grid
    MoveFocus(Direction),
    /// Press the focused key
    PressFocused(u64),

    // Window
    /// Toggle help overlay
    ToggleHelp,
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Apply a message to the model.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::PressKey(key, now_ms) => press_key(&mut model, key, now_ms),
        Message::InsertText(text) => model.buffer.insert_text_at_cursor(&text),
        Message::DeleteBackward => {
            model.buffer.delete_backward();
        }
        Message::DeleteHoldStart(now_ms) => {
            model.buffer.delete_backward();
            model.repeat.press(now_ms);
        }
        Message::DeleteHoldEnd => model.repeat.release(),
        Message::Tick(now_ms) => {
            let due = model.repeat.take_due(now_ms);
            for _ in 0..due {
                if !model.buffer.delete_backward() {
                    break;
                }
            }
        }

        Message::MoveCursorLeft => model.buffer.move_cursor_left(),
        Message::MoveCursorRight => model.buffer.move_cursor_right(),
        Message::MoveCursorToStart => model.buffer.move_cursor_to_start(),
        Message::MoveCursorToEnd => model.buffer.move_cursor_to_end(),

        Message::ChangeTextInput(sink) => {
            model.repeat.release();
            model.active_field = model
                .fields
                .iter()
                .position(|field| field.sink.same_sink(&sink));
            model.buffer.change_text_input(sink);
        }
        Message::NextField => {
            if !model.fields.is_empty() {
                let next = model
                    .active_field
                    .map_or(0, |idx| (idx + 1) % model.fields.len());
                let sink = model.fields[next].sink.clone();
                return update(model, Message::ChangeTextInput(sink));
            }
        }

        Message::MoveFocus(direction) => move_focus(&mut model, direction),
        Message::PressFocused(now_ms) => {
            if let Some(key) = model.focused_key() {
                return update(model, Message::PressKey(key, now_ms));
            }
        }

        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::Redraw => {}
        Message::Quit => model.should_quit = true,
    }
    model
}

fn press_key(model: &mut Model, key: Key, now_ms: u64) {
    let shift_before = model.shift_snapshot();
    match key {
        Key::Character(ch) => {
            let text = if model.mode == KeyboardMode::Letters {
                model.shift.apply(ch)
            } else {
                ch.to_string()
            };
            model.buffer.insert_text_at_cursor(&text);
        }
        Key::Space => model.buffer.insert_text_at_cursor(" "),
        Key::Accent => model.buffer.compose_accent(),
        Key::Delete => {
            model.buffer.delete_backward();
        }
        Key::Shift => model.shift.tap(now_ms),
        Key::Mode(mode) => switch_mode(model, mode),
    }
    if key.inserts_text() {
        model.shift.character_inserted();
    }
    let shift_after = model.shift_snapshot();
    if shift_after != shift_before {
        model.notify(shift_after);
    }
}

fn switch_mode(model: &mut Model, mode: KeyboardMode) {
    if model.mode == mode {
        return;
    }
    debug!(from = %model.mode, to = %mode, "keyboard mode changed");
    model.mode = mode;
    model.clamp_focus();
    model.notify(KeyboardEvent::ModeChanged(mode));
}

fn move_focus(model: &mut Model, direction: Direction) {
    let (row, col) = model.focus;
    model.focus = match direction {
        Direction::Up => (row.saturating_sub(1), col),
        Direction::Down => (row + 1, col),
        Direction::Left => (row, col.saturating_sub(1)),
        Direction::Right => (row, col + 1),
    };
    model.clamp_focus();
}
