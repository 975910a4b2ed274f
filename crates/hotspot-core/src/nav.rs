// ── Navigation ──
//
// The view router holds the one piece of state shared across panels: the
// identity of the active panel. The sidebar owns a single cosmetic flag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identifies each panel, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    #[default]
    Dashboard, // 1
    Vouchers,  // 2
    Locations, // 3
    Router,    // 4
    Templates, // 5
    Remote,    // 6
    Config,    // 7
    Settings,  // 8
}

impl PanelId {
    /// All panels in sidebar order.
    pub const ALL: [PanelId; 8] = [
        Self::Dashboard,
        Self::Vouchers,
        Self::Locations,
        Self::Router,
        Self::Templates,
        Self::Remote,
        Self::Config,
        Self::Settings,
    ];

    /// Resolve a panel identifier. Unknown identifiers fall back to the
    /// dashboard.
    pub fn from_ident(ident: &str) -> Self {
        match ident.trim().to_ascii_lowercase().as_str() {
            "vouchers" => Self::Vouchers,
            "locations" => Self::Locations,
            "router" => Self::Router,
            "templates" => Self::Templates,
            "remote" => Self::Remote,
            "config" => Self::Config,
            "settings" => Self::Settings,
            _ => Self::Dashboard,
        }
    }

    /// Stable identifier, the inverse of [`from_ident`](Self::from_ident).
    pub fn ident(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Vouchers => "vouchers",
            Self::Locations => "locations",
            Self::Router => "router",
            Self::Templates => "templates",
            Self::Remote => "remote",
            Self::Config => "config",
            Self::Settings => "settings",
        }
    }

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Vouchers => "Vouchers",
            Self::Locations => "Locations",
            Self::Router => "Router Control",
            Self::Templates => "Templates",
            Self::Remote => "Remote Access",
            Self::Config => "Config Files",
            Self::Settings => "Settings",
        }
    }

    /// Numeric key (1-8) for this panel.
    pub fn number(self) -> u8 {
        match self {
            Self::Dashboard => 1,
            Self::Vouchers => 2,
            Self::Locations => 3,
            Self::Router => 4,
            Self::Templates => 5,
            Self::Remote => 6,
            Self::Config => 7,
            Self::Settings => 8,
        }
    }

    /// Panel from a numeric key (1-8). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.number() == n)
    }

    /// Position in sidebar order.
    pub fn index(self) -> usize {
        usize::from(self.number() - 1)
    }

    /// Next panel in sidebar order (wraps around).
    pub fn next(self) -> Self {
        Self::ALL
            .get((self.index() + 1) % Self::ALL.len())
            .copied()
            .unwrap_or_default()
    }

    /// Previous panel in sidebar order (wraps around).
    pub fn prev(self) -> Self {
        Self::ALL
            .get((self.index() + Self::ALL.len() - 1) % Self::ALL.len())
            .copied()
            .unwrap_or_default()
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PanelId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_ident(s))
    }
}

/// Holds the active panel and remembers the previous one for "back".
#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    active: PanelId,
    previous: Option<PanelId>,
}

impl ViewRouter {
    pub fn new(initial: PanelId) -> Self {
        Self {
            active: initial,
            previous: None,
        }
    }

    pub fn active(&self) -> PanelId {
        self.active
    }

    /// Switch panels. Returns `true` if the active panel changed.
    pub fn select(&mut self, target: PanelId) -> bool {
        if target == self.active {
            return false;
        }
        debug!(from = %self.active, to = %target, "switching panel");
        self.previous = Some(self.active);
        self.active = target;
        true
    }

    /// Return to the previously active panel, if any.
    pub fn back(&mut self) -> bool {
        match self.previous.take() {
            Some(prev) => {
                let changed = self.select(prev);
                // Going back should not make "back" bounce forever.
                self.previous = None;
                changed
            }
            None => false,
        }
    }
}

/// Sidebar chrome state. Collapsing hides labels; it never changes which
/// panel is active.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sidebar {
    collapsed: bool,
}

impl Sidebar {
    pub fn new(collapsed: bool) -> Self {
        Self { collapsed }
    }

    pub fn collapsed(self) -> bool {
        self.collapsed
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Column width of the sidebar for the current state.
    pub fn width(self) -> u16 {
        if self.collapsed { 6 } else { 24 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_ident_round_trips() {
        for panel in PanelId::ALL {
            assert_eq!(PanelId::from_ident(panel.ident()), panel);
        }
    }

    #[test]
    fn unknown_ident_falls_back_to_dashboard() {
        assert_eq!(PanelId::from_ident("reports"), PanelId::Dashboard);
        assert_eq!(PanelId::from_ident(""), PanelId::Dashboard);
        assert_eq!("ROUTER".parse::<PanelId>(), Ok(PanelId::Router));
    }

    #[test]
    fn number_keys_cover_all_panels_in_order() {
        for (i, panel) in PanelId::ALL.iter().enumerate() {
            assert_eq!(panel.index(), i);
            assert_eq!(PanelId::from_number(panel.number()), Some(*panel));
        }
        assert_eq!(PanelId::from_number(0), None);
        assert_eq!(PanelId::from_number(9), None);
    }

    #[test]
    fn next_and_prev_wrap() {
        assert_eq!(PanelId::Settings.next(), PanelId::Dashboard);
        assert_eq!(PanelId::Dashboard.prev(), PanelId::Settings);
        assert_eq!(PanelId::Router.next(), PanelId::Templates);
    }

    #[test]
    fn router_starts_on_initial_panel_and_tracks_back() {
        let mut router = ViewRouter::default();
        assert_eq!(router.active(), PanelId::Dashboard);

        assert!(router.select(PanelId::Vouchers));
        assert!(!router.select(PanelId::Vouchers));
        assert!(router.select(PanelId::from_ident("templates")));
        assert_eq!(router.active(), PanelId::Templates);

        assert!(router.back());
        assert_eq!(router.active(), PanelId::Vouchers);
        assert!(!router.back());
    }

    #[test]
    fn garbage_ident_lands_on_dashboard() {
        let mut router = ViewRouter::new(PanelId::Remote);
        assert!(router.select(PanelId::from_ident("not-a-panel")));
        assert_eq!(router.active(), PanelId::Dashboard);
    }

    #[test]
    fn sidebar_toggle_is_cosmetic() {
        let mut sidebar = Sidebar::default();
        assert!(!sidebar.collapsed());
        assert_eq!(sidebar.width(), 24);
        sidebar.toggle();
        assert!(sidebar.collapsed());
        assert_eq!(sidebar.width(), 6);
    }
}
