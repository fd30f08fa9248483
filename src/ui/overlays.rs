use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use super::style::Palette;

pub fn render_help_overlay(frame: &mut Frame, area: Rect, palette: &Palette) {
    let popup = centered_popup_rect(48, 22, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("Typing", section_style));
    all_lines.push(Line::raw("  Letters, digits      Press the matching key"));
    all_lines.push(Line::raw("  Space                Space key"));
    all_lines.push(Line::raw("  Backspace            Delete (hold to repeat)"));
    all_lines.push(Line::raw("  F2                   Shift (double tap: caps)"));
    all_lines.push(Line::raw("  F6                   Accent key"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Layouts", section_style));
    all_lines.push(Line::raw("  F3 / F4 / F5         Letters / numbers / symbols"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("On-screen keys", section_style));
    all_lines.push(Line::raw("  Up/Down, Ctrl-arrows Move key focus"));
    all_lines.push(Line::raw("  Enter                Press focused key"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Fields", section_style));
    all_lines.push(Line::raw("  Left/Right, Home/End Move cursor"));
    all_lines.push(Line::raw("  Tab                  Bind next field"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Esc or F1 closes this help", palette.dim));

    let help = Paragraph::new(all_lines).style(palette.base).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
