//! Neon palette and semantic styling for the TUI.
//!
//! Every status enum maps to its color through an exhaustive `match`, so
//! adding a variant in `hotspot-core` will not compile until it has a
//! style here.

use ratatui::style::{Color, Modifier, Style};

use hotspot_core::{
    ActivityStatus, LocationStatus, RouterStatus, SessionStatus, StatVariant, VoucherStatus,
};

use crate::action::NotificationLevel;

// ── Core Palette ──────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29
pub const LIGHT_BLUE: Color = Color::Rgb(139, 233, 253); // #8be9fd

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn border(focused: bool) -> Style {
    if focused {
        border_focused()
    } else {
        border_default()
    }
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(NEON_CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active entry in the sidebar or a sub-tab bar.
pub fn tab_active() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

// ── Status mappings ───────────────────────────────────────────────────

pub fn voucher_status(status: VoucherStatus) -> Color {
    match status {
        VoucherStatus::Active => SUCCESS_GREEN,
        VoucherStatus::Used => BORDER_GRAY,
        VoucherStatus::Expired => ERROR_RED,
    }
}

pub fn location_status(status: LocationStatus) -> Color {
    match status {
        LocationStatus::Online => SUCCESS_GREEN,
        LocationStatus::Warning => ELECTRIC_YELLOW,
        LocationStatus::Offline => ERROR_RED,
    }
}

pub fn router_status(status: RouterStatus) -> Color {
    match status {
        RouterStatus::Online => SUCCESS_GREEN,
        RouterStatus::Warning => ELECTRIC_YELLOW,
        RouterStatus::Offline => ERROR_RED,
    }
}

pub fn session_status(status: SessionStatus) -> Color {
    match status {
        SessionStatus::Connected => SUCCESS_GREEN,
        SessionStatus::Disconnected => BORDER_GRAY,
    }
}

pub fn activity_status(status: ActivityStatus) -> Color {
    match status {
        ActivityStatus::Success => SUCCESS_GREEN,
        ActivityStatus::Info => NEON_CYAN,
        ActivityStatus::Warning => ELECTRIC_YELLOW,
        ActivityStatus::Error => ERROR_RED,
    }
}

pub fn stat_variant(variant: StatVariant) -> Color {
    match variant {
        StatVariant::Default => NEON_CYAN,
        StatVariant::Success => SUCCESS_GREEN,
        StatVariant::Warning => ELECTRIC_YELLOW,
        StatVariant::Destructive => ERROR_RED,
    }
}

/// Border color and icon for a toast.
pub fn notification(level: NotificationLevel) -> (Color, &'static str) {
    match level {
        NotificationLevel::Success => (SUCCESS_GREEN, "\u{2713}"),
        NotificationLevel::Error => (ERROR_RED, "\u{2717}"),
        NotificationLevel::Warning => (ELECTRIC_YELLOW, "!"),
        NotificationLevel::Info => (NEON_CYAN, "\u{b7}"),
    }
}

/// Color for a utilization percentage.
pub fn usage(percent: u8) -> Color {
    match percent {
        0..=59 => SUCCESS_GREEN,
        60..=84 => ELECTRIC_YELLOW,
        _ => ERROR_RED,
    }
}

/// Parse a template hex color for the preview. Malformed drafts fall back
/// to `fallback` so the preview keeps rendering while the user types.
pub fn hex(value: &str, fallback: Color) -> Color {
    hotspot_core::model::parse_hex_color(value).map_or(fallback, |(r, g, b)| Color::Rgb(r, g, b))
}
