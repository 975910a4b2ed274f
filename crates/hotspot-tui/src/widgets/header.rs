//! Two-line panel heading: bold title over a dim subtitle.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme;

/// Rows consumed by [`render_header`], including the spacer.
pub const HEIGHT: u16 = 3;

pub fn render_header(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let lines = vec![
        Line::from(Span::styled(
            format!(" {title}"),
            Style::default()
                .fg(theme::NEON_CYAN)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!(" {subtitle}"), theme::key_hint())),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
