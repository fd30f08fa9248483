use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::Model;
use crate::keyboard::Key;

use super::style::{Palette, palette};
use super::{FIELD_HEIGHT, KEY_MIN_WIDTH, SPACE_KEY_WIDTH, overlays, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let palette = palette(model.theme);
    frame.render_widget(Block::default().style(palette.base), area);

    let field_count = u16::try_from(model.fields.len().max(1)).unwrap_or(u16::MAX);
    let [fields_area, keys_area, status_area] = Layout::vertical([
        Constraint::Length(field_count.saturating_mul(FIELD_HEIGHT)),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_fields(model, frame, fields_area, &palette);
    render_keyboard(model, frame, keys_area, &palette);
    status::render_status_bar(model, frame, status_area, &palette);

    if model.help_visible {
        overlays::render_help_overlay(frame, area, &palette);
    }
}

struct FieldView<'a> {
    name: &'a str,
    text: String,
    /// Cursor offset when this field is bound to the keyboard
    cursor: Option<usize>,
}

fn field_views(model: &Model) -> Vec<FieldView<'_>> {
    if model.fields.is_empty() {
        return vec![FieldView {
            name: "buffer",
            text: model.buffer.value(),
            cursor: Some(model.buffer.cursor()),
        }];
    }
    model
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            if model.active_field == Some(idx) {
                FieldView {
                    name: &field.name,
                    text: model.buffer.value(),
                    cursor: Some(model.buffer.cursor()),
                }
            } else {
                FieldView {
                    name: &field.name,
                    text: field.sink.text().unwrap_or_default(),
                    cursor: None,
                }
            }
        })
        .collect()
}

fn render_fields(model: &Model, frame: &mut Frame, area: Rect, palette: &Palette) {
    let views = field_views(model);
    let constraints = views.iter().map(|_| Constraint::Length(FIELD_HEIGHT));
    let rows = Layout::vertical(constraints).split(area);

    for (view, row) in views.iter().zip(rows.iter()) {
        let border = if view.cursor.is_some() {
            palette.field_active
        } else {
            palette.field_idle
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", view.name));
        let inner_width = row.width.saturating_sub(2);
        let line = match view.cursor {
            Some(cursor) => field_line(&view.text, cursor, inner_width, palette),
            None => Line::raw(tail_to_width(&view.text, usize::from(inner_width))),
        };
        frame.render_widget(Paragraph::new(line).block(block), *row);
    }
}

/// One-line rendering of a field with the cursor cell highlighted.
///
/// Text before the cursor is trimmed from the left so the cursor stays
/// visible within `width` columns.
pub fn field_line(text: &str, cursor: usize, width: u16, palette: &Palette) -> Line<'static> {
    let before: String = text.chars().take(cursor).collect();
    let mut rest = text.chars().skip(cursor);
    let at = rest.next().map_or_else(|| " ".to_string(), String::from);
    let after: String = rest.collect();

    let budget = usize::from(width).saturating_sub(at.width());
    let before = tail_to_width(&before, budget);

    Line::from(vec![
        Span::raw(before),
        Span::styled(at, palette.cursor),
        Span::raw(after),
    ])
}

fn tail_to_width(text: &str, width: usize) -> String {
    let mut out = text.to_string();
    while out.width() > width && !out.is_empty() {
        out.remove(0);
    }
    out
}

/// Pad a key label into a centered cap at least `min_width` wide.
pub fn key_cell(label: &str, min_width: usize) -> String {
    let label_width = label.width();
    let pad = min_width.saturating_sub(label_width);
    let left = pad / 2;
    format!(" {}{label}{} ", " ".repeat(left), " ".repeat(pad - left))
}

fn key_style(model: &Model, key: Key, focused: bool, palette: &Palette) -> Style {
    let latched = match key {
        Key::Shift => model.shift.is_upper_case() == Some(true),
        Key::Delete => model.delete_held(),
        Key::Mode(mode) => mode == model.mode,
        _ => false,
    };
    if focused {
        palette.key_focused
    } else if latched {
        palette.key_latched
    } else {
        palette.key
    }
}

fn render_keyboard(model: &Model, frame: &mut Frame, area: Rect, palette: &Palette) {
    let mut lines: Vec<Line> = Vec::new();
    for (row_idx, keys) in model.rows().iter().enumerate() {
        if row_idx > 0 {
            lines.push(Line::raw(""));
        }
        let mut spans = Vec::with_capacity(keys.len() * 2);
        for (col_idx, key) in keys.iter().enumerate() {
            if col_idx > 0 {
                spans.push(Span::raw(" "));
            }
            let min_width = if *key == Key::Space {
                SPACE_KEY_WIDTH
            } else {
                KEY_MIN_WIDTH
            };
            let focused = model.focus == (row_idx, col_idx);
            spans.push(Span::styled(
                key_cell(&key.label(&model.shift), min_width),
                key_style(model, *key, focused, palette),
            ));
        }
        lines.push(Line::from(spans).centered());
    }
    let top_pad = area
        .height
        .saturating_sub(u16::try_from(lines.len()).unwrap_or(u16::MAX))
        / 2;
    let keys_area = Rect {
        y: area.y + top_pad,
        height: area.height.saturating_sub(top_pad),
        ..area
    };
    frame.render_widget(Paragraph::new(lines), keys_area);
}
