use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Direction, Message, Model};
use crate::keyboard::{Key, KeyboardMode};

impl App {
    pub(super) fn handle_event(&self, event: Event, model: &Model, now_ms: u64) -> Option<Message> {
        match event {
            Event::Key(key) => self.handle_key(key, model, now_ms),
            Event::Paste(text) => Some(Message::InsertText(text)),
            Event::Resize(..) => Some(Message::Redraw),
            _ => None,
        }
    }

    pub(super) fn handle_key(&self, key: KeyEvent, model: &Model, now_ms: u64) -> Option<Message> {
        // Backspace drives the repeat timer itself when the terminal reports
        // releases; otherwise the terminal's own autorepeat is used.
        if key.code == KeyCode::Backspace {
            return match (self.enhanced_keys, key.kind) {
                (true, KeyEventKind::Press) => Some(Message::DeleteHoldStart(now_ms)),
                (true, KeyEventKind::Release) => Some(Message::DeleteHoldEnd),
                (true, _) | (false, KeyEventKind::Release) => None,
                (false, _) => Some(Message::DeleteBackward),
            };
        }
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if model.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::F(1) => Some(Message::ToggleHelp),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Message::Quit)
                }
                _ => None,
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Some(Message::Quit),
            KeyCode::Char('c') if ctrl => Some(Message::Quit),
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::F(2) => Some(Message::PressKey(Key::Shift, now_ms)),
            KeyCode::F(3) => Some(Message::PressKey(Key::Mode(KeyboardMode::Letters), now_ms)),
            KeyCode::F(4) => Some(Message::PressKey(Key::Mode(KeyboardMode::Numbers), now_ms)),
            KeyCode::F(5) => Some(Message::PressKey(Key::Mode(KeyboardMode::Symbols), now_ms)),
            KeyCode::F(6) => Some(Message::PressKey(Key::Accent, now_ms)),
            KeyCode::Tab => Some(Message::NextField),

            KeyCode::Left if ctrl => Some(Message::MoveFocus(Direction::Left)),
            KeyCode::Right if ctrl => Some(Message::MoveFocus(Direction::Right)),
            KeyCode::Up => Some(Message::MoveFocus(Direction::Up)),
            KeyCode::Down => Some(Message::MoveFocus(Direction::Down)),
            KeyCode::Enter => Some(Message::PressFocused(now_ms)),

            KeyCode::Left => Some(Message::MoveCursorLeft),
            KeyCode::Right => Some(Message::MoveCursorRight),
            KeyCode::Home => Some(Message::MoveCursorToStart),
            KeyCode::End => Some(Message::MoveCursorToEnd),

            KeyCode::Char(' ') => Some(Message::PressKey(Key::Space, now_ms)),
            KeyCode::Char(ch) if !ctrl => Some(Message::PressKey(Key::Character(ch), now_ms)),
            _ => None,
        }
    }
}
