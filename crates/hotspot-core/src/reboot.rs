// ── Router reboot confirmation flow ──
//
// Idle → Confirming → Rebooting → Idle. Every confirm stamps a fresh
// generation; completion must present the matching generation, so a
// timer left over from an earlier reboot cannot end a later one.
// Transitions that do not apply to the current state are ignored.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebootState {
    #[default]
    Idle,
    Confirming,
    Rebooting { generation: u64 },
}

#[derive(Debug, Clone, Default)]
pub struct RebootFlow {
    state: RebootState,
    generation: u64,
}

impl RebootFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RebootState {
        self.state
    }

    /// Whether the reboot trigger can be pressed.
    pub fn trigger_enabled(&self) -> bool {
        !matches!(self.state, RebootState::Rebooting { .. })
    }

    pub fn is_confirming(&self) -> bool {
        self.state == RebootState::Confirming
    }

    /// Open the confirmation dialog. Returns `true` on transition.
    pub fn request(&mut self) -> bool {
        self.transition(RebootState::Idle, RebootState::Confirming)
    }

    /// Dismiss the confirmation dialog. Returns `true` on transition.
    pub fn cancel(&mut self) -> bool {
        self.transition(RebootState::Confirming, RebootState::Idle)
    }

    /// Confirm the reboot, returning the generation the completion timer
    /// must carry. `None` when not confirming.
    pub fn confirm(&mut self) -> Option<u64> {
        if self.state != RebootState::Confirming {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        debug!(generation, "reboot confirmed");
        self.state = RebootState::Rebooting { generation };
        Some(generation)
    }

    /// Finish the reboot started with `generation`. Stale generations and
    /// calls outside `Rebooting` are ignored.
    pub fn complete(&mut self, generation: u64) -> bool {
        match self.state {
            RebootState::Rebooting { generation: current } if current == generation => {
                debug!(generation, "reboot complete");
                self.state = RebootState::Idle;
                true
            }
            _ => false,
        }
    }

    fn transition(&mut self, from: RebootState, to: RebootState) -> bool {
        if self.state != from {
            return false;
        }
        debug!(?from, ?to, "reboot flow");
        self.state = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RouterPanel;
    use crate::seed::Seed;

    #[test]
    fn request_then_cancel_returns_to_idle_without_touching_router() {
        let seed = Seed::builtin();
        let panel = RouterPanel::new(seed.routers.clone(), seed.router_details.clone(), seed.leases);
        let mut flow = RebootFlow::new();

        assert!(flow.request());
        assert!(flow.is_confirming());
        assert!(flow.cancel());
        assert_eq!(flow.state(), RebootState::Idle);
        assert_eq!(panel.routers(), seed.routers.as_slice());
        assert_eq!(panel.details(), &seed.router_details);
    }

    #[test]
    fn confirm_disables_trigger_until_complete() {
        let mut flow = RebootFlow::new();
        flow.request();
        let generation = flow.confirm();
        assert_eq!(generation, Some(1));
        assert!(!flow.trigger_enabled());

        assert!(flow.complete(1));
        assert_eq!(flow.state(), RebootState::Idle);
        assert!(flow.trigger_enabled());
    }

    #[test]
    fn invalid_transitions_are_no_ops() {
        let mut flow = RebootFlow::new();
        assert!(!flow.cancel());
        assert_eq!(flow.confirm(), None);
        assert!(!flow.complete(0));
        assert_eq!(flow.state(), RebootState::Idle);

        flow.request();
        assert!(!flow.request());
        flow.confirm();
        assert!(!flow.request());
        assert!(!flow.cancel());
        assert!(matches!(flow.state(), RebootState::Rebooting { .. }));
    }

    #[test]
    fn stale_generation_cannot_finish_a_later_reboot() {
        let mut flow = RebootFlow::new();
        flow.request();
        let first = flow.confirm().unwrap_or_default();
        assert!(flow.complete(first));

        flow.request();
        let second = flow.confirm().unwrap_or_default();
        assert_ne!(first, second);
        assert!(!flow.complete(first));
        assert_eq!(flow.state(), RebootState::Rebooting { generation: second });
        assert!(flow.complete(second));
    }
}
