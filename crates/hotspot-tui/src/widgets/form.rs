//! Form rows shared by the template, remote, and settings panels.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::theme;

/// How a text field is being interacted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Idle,
    Focused,
    Editing,
}

/// Labelled text box, three rows for the box plus one for the label.
pub fn render_input_field(frame: &mut Frame, area: Rect, label: &str, value: &str, state: FieldState) {
    if area.height < 4 {
        render_inline_field(frame, area, label, value, state);
        return;
    }

    let label_style = match state {
        FieldState::Idle => Style::default().fg(theme::DIM_WHITE),
        FieldState::Focused | FieldState::Editing => Style::default().fg(theme::NEON_CYAN),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!("  {label}"), label_style)),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let border_color = match state {
        FieldState::Idle => theme::BORDER_GRAY,
        FieldState::Focused => theme::LIGHT_BLUE,
        FieldState::Editing => theme::ELECTRIC_PURPLE,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));

    let block_area = Rect::new(area.x, area.y + 1, area.width, 3);
    let inner = block.inner(block_area);
    frame.render_widget(block, block_area);

    let text = if state == FieldState::Editing {
        format!("{value}\u{2588}")
    } else {
        value.to_owned()
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(theme::NEON_CYAN))),
        inner,
    );
}

/// Single-row `label: value` for cramped layouts.
pub fn render_inline_field(frame: &mut Frame, area: Rect, label: &str, value: &str, state: FieldState) {
    if area.height == 0 {
        return;
    }
    let (marker, label_style) = match state {
        FieldState::Idle => ("  ", Style::default().fg(theme::DIM_WHITE)),
        FieldState::Focused => ("\u{25b8} ", Style::default().fg(theme::NEON_CYAN)),
        FieldState::Editing => ("\u{270e} ", Style::default().fg(theme::ELECTRIC_PURPLE)),
    };
    let cursor = if state == FieldState::Editing { "\u{2588}" } else { "" };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme::ELECTRIC_PURPLE)),
            Span::styled(format!("{label:<18}"), label_style),
            Span::styled(format!("{value}{cursor}"), Style::default().fg(theme::NEON_CYAN)),
        ])),
        Rect::new(area.x, area.y, area.width, 1),
    );
}

/// `[✓] label` checkbox row with an optional dim description.
pub fn toggle_line<'a>(label: &'a str, description: Option<&'a str>, value: bool, active: bool) -> Line<'a> {
    let marker = if value { "[\u{2713}]" } else { "[ ]" };
    let marker_style = if active {
        Style::default().fg(theme::ELECTRIC_PURPLE)
    } else if value {
        Style::default().fg(theme::SUCCESS_GREEN)
    } else {
        Style::default().fg(theme::BORDER_GRAY)
    };
    let label_style = if active {
        Style::default().fg(theme::NEON_CYAN)
    } else {
        Style::default().fg(theme::DIM_WHITE)
    };

    let mut spans = vec![
        Span::styled(if active { "\u{25b8} " } else { "  " }, Style::default().fg(theme::ELECTRIC_PURPLE)),
        Span::styled(format!("{marker} "), marker_style),
        Span::styled(label, label_style),
    ];
    if let Some(desc) = description {
        spans.push(Span::styled(format!("  {desc}"), theme::key_hint()));
    }
    Line::from(spans)
}

/// Apply one editing keystroke to a text buffer. Returns `true` if the
/// buffer changed.
pub fn edit_buffer(buffer: &mut String, key: crossterm::event::KeyCode) -> bool {
    use crossterm::event::KeyCode;
    match key {
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Char(c) => {
            buffer.push(c);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn edit_buffer_pushes_and_pops() {
        let mut buf = String::from("ab");
        assert!(edit_buffer(&mut buf, KeyCode::Char('c')));
        assert!(edit_buffer(&mut buf, KeyCode::Backspace));
        assert!(edit_buffer(&mut buf, KeyCode::Backspace));
        assert_eq!(buf, "a");
        assert!(!edit_buffer(&mut buf, KeyCode::Left));
        buf.clear();
        assert!(!edit_buffer(&mut buf, KeyCode::Backspace));
    }

    #[test]
    fn toggle_line_marks_checked_state() {
        let text: String = toggle_line("Show Logo", None, true, false)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, "  [\u{2713}] Show Logo");
    }
}
