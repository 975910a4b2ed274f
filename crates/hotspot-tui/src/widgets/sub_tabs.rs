//! Horizontal sub-tab bar for use within panels (router views, settings
//! sections).

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme;

const SEPARATOR: &str = "  ";

/// Renders a horizontal tab bar line with the active tab highlighted.
///
/// The active tab gets Electric Purple + brackets; inactive tabs get Dim White.
pub fn render_sub_tabs<'a>(labels: &[&'a str], active_index: usize) -> Line<'a> {
    let mut spans = Vec::with_capacity(labels.len() * 2);

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(SEPARATOR, theme::key_hint()));
        }

        if i == active_index {
            spans.push(Span::styled(
                format!("[{label}]"),
                theme::tab_active().add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(*label, theme::tab_inactive()));
        }
    }

    Line::from(spans)
}

/// Which tab sits under `column` (relative to the start of the line), using
/// the same widths `render_sub_tabs` produces.
pub fn tab_at(labels: &[&str], active_index: usize, column: u16) -> Option<usize> {
    let column = usize::from(column);
    let mut x = 0usize;
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            x += SEPARATOR.len();
        }
        let width = label.chars().count() + if i == active_index { 2 } else { 0 };
        if column >= x && column < x + width {
            return Some(i);
        }
        x += width;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 3] = ["Overview", "DHCP", "System"];

    #[test]
    fn active_tab_is_bracketed() {
        let line = render_sub_tabs(&LABELS, 1);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Overview  [DHCP]  System");
    }

    #[test]
    fn hit_test_matches_rendered_layout() {
        // "Overview  [DHCP]  System"
        assert_eq!(tab_at(&LABELS, 1, 0), Some(0));
        assert_eq!(tab_at(&LABELS, 1, 7), Some(0));
        assert_eq!(tab_at(&LABELS, 1, 8), None);
        assert_eq!(tab_at(&LABELS, 1, 10), Some(1));
        assert_eq!(tab_at(&LABELS, 1, 15), Some(1));
        assert_eq!(tab_at(&LABELS, 1, 18), Some(2));
        assert_eq!(tab_at(&LABELS, 1, 40), None);
    }
}
