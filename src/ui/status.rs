use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::editor::EditPolicy;
use crate::keyboard::ShiftCase;

use super::style::Palette;

pub fn status_text(model: &Model) -> String {
    let shift = if model.shift.is_enabled() {
        match model.shift.case() {
            ShiftCase::Lower => "lower",
            ShiftCase::Upper => "upper",
            ShiftCase::CapsLocked => "CAPS",
        }
    } else {
        "no shift"
    };
    let policy = match model.buffer.policy() {
        EditPolicy::CursorAware => "cursor",
        EditPolicy::Append => "append",
    };
    let field = model.active_field_name().unwrap_or("unbound");
    format!(
        " {}  [{}]  {}  {}  {} {}/{}  F1:help",
        model.mode,
        shift,
        model.locale,
        policy,
        field,
        model.buffer.cursor(),
        model.buffer.len()
    )
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect, palette: &Palette) {
    let bar = Paragraph::new(status_text(model)).style(palette.status);
    frame.render_widget(bar, area);
}
