// ── Router control panel state ──
//
// Router data is read-only apart from which router is selected and the
// local DHCP switch. Rebooting lives in `reboot` so its state machine can
// be tested on its own.

use tracing::debug;

use crate::error::CoreError;
use crate::model::{DhcpLease, EntityId, Router, RouterDetails};

#[derive(Debug, Clone)]
pub struct RouterPanel {
    routers: Vec<Router>,
    selected: usize,
    details: RouterDetails,
    leases: Vec<DhcpLease>,
    dhcp_enabled: bool,
}

impl RouterPanel {
    pub fn new(routers: Vec<Router>, details: RouterDetails, leases: Vec<DhcpLease>) -> Self {
        let dhcp_enabled = details.dhcp_enabled;
        Self {
            routers,
            selected: 0,
            details,
            leases,
            dhcp_enabled,
        }
    }

    pub fn routers(&self) -> &[Router] {
        &self.routers
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected router, or `None` when no routers are configured.
    pub fn current(&self) -> Option<&Router> {
        self.routers.get(self.selected)
    }

    pub fn select(&mut self, id: &EntityId) -> Result<&Router, CoreError> {
        let index = self
            .routers
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| CoreError::not_found("router", id.as_str()))?;
        debug!(router = %id, "router selected");
        self.selected = index;
        self.routers
            .get(index)
            .ok_or_else(|| CoreError::not_found("router", id.as_str()))
    }

    /// Move the selection by `delta`, wrapping at both ends.
    pub fn cycle(&mut self, delta: isize) {
        let len = self.routers.len();
        if len == 0 {
            return;
        }
        let len = isize::try_from(len).unwrap_or(isize::MAX);
        let current = isize::try_from(self.selected).unwrap_or(0);
        self.selected = usize::try_from((current + delta).rem_euclid(len)).unwrap_or(0);
    }

    pub fn details(&self) -> &RouterDetails {
        &self.details
    }

    pub fn leases(&self) -> &[DhcpLease] {
        &self.leases
    }

    pub fn dhcp_enabled(&self) -> bool {
        self.dhcp_enabled
    }

    /// Flip the DHCP server switch. Local only; nothing is pushed to a device.
    pub fn toggle_dhcp(&mut self) -> bool {
        self.dhcp_enabled = !self.dhcp_enabled;
        self.dhcp_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;

    fn panel() -> RouterPanel {
        let seed = Seed::builtin();
        RouterPanel::new(seed.routers, seed.router_details, seed.leases)
    }

    #[test]
    fn starts_on_first_router() {
        let panel = panel();
        assert_eq!(panel.current().map(|r| r.id.as_str()), Some("main"));
        assert!(panel.dhcp_enabled());
    }

    #[test]
    fn select_by_id_and_miss() {
        let mut panel = panel();
        assert!(panel.select(&EntityId::from("branch-b")).is_ok());
        assert_eq!(panel.selected_index(), 2);

        let err = panel.select(&EntityId::from("branch-z")).err();
        assert!(matches!(err, Some(CoreError::NotFound { entity_type: "router", .. })));
        assert_eq!(panel.selected_index(), 2);
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let mut panel = panel();
        panel.cycle(-1);
        assert_eq!(panel.selected_index(), 2);
        panel.cycle(1);
        assert_eq!(panel.selected_index(), 0);
        panel.cycle(4);
        assert_eq!(panel.selected_index(), 1);
    }

    #[test]
    fn toggling_dhcp_leaves_details_alone() {
        let mut panel = panel();
        let before = panel.details().clone();
        assert!(!panel.toggle_dhcp());
        assert_eq!(panel.details(), &before);
    }
}
