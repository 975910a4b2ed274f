//! Eighth-block usage bars for gauges on the dashboard and router panels.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme;

/// A bar `width` cells wide, filled to `ratio` (clamped to 0..=1) with
/// eighth-block precision and padded with spaces.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn bar(ratio: f64, width: u16) -> String {
    const FRACTIONAL: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];

    if width == 0 {
        return String::new();
    }
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let total_eighths = (ratio * f64::from(width) * 8.0).round() as u32;
    let full = total_eighths / 8;
    let remainder = total_eighths % 8;

    let mut out = "█".repeat(full as usize);
    if remainder > 0 {
        out.push(FRACTIONAL.get(remainder as usize).copied().unwrap_or(' '));
    }
    let used = full + u32::from(remainder > 0);
    out.push_str(&" ".repeat(u32::from(width).saturating_sub(used) as usize));
    out
}

/// `label  ████▌     value` with a dim track behind the bar.
pub fn meter_line(label: &str, value: &str, ratio: f64, width: u16, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<16}"), Style::default().fg(theme::DIM_WHITE)),
        Span::styled(bar(ratio, width), Style::default().fg(color).bg(theme::BG_HIGHLIGHT)),
        Span::styled(
            format!(" {value}"),
            Style::default().fg(theme::NEON_CYAN).add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Ratio for a 0-100 percentage.
pub fn percent(p: u8) -> f64 {
    f64::from(p.min(100)) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_always_exactly_width_cells() {
        for ratio in [0.0, 0.13, 0.5, 0.99, 1.0, 7.5, -1.0, f64::NAN] {
            assert_eq!(bar(ratio, 10).chars().count(), 10, "ratio {ratio}");
        }
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0.0, 4), "    ");
        assert_eq!(bar(0.5, 4), "██  ");
        assert_eq!(bar(1.0, 4), "████");
        assert_eq!(bar(0.0625, 2), "▏ ");
    }

    #[test]
    fn percent_saturates() {
        assert!((percent(65) - 0.65).abs() < f64::EPSILON);
        assert!((percent(250) - 1.0).abs() < f64::EPSILON);
    }
}
