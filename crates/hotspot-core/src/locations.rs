// ── Location list ──

use crate::model::{Location, LocationStatus};

/// Headline counts for the locations panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationSummary {
    pub total: usize,
    pub online: usize,
    pub warning: usize,
    pub offline: usize,
    pub routers: u32,
    pub active_users: u32,
}

#[derive(Debug, Clone, Default)]
pub struct LocationBook {
    locations: Vec<Location>,
}

impl LocationBook {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    pub fn get(&self, index: usize) -> Option<&Location> {
        self.locations.get(index)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn summary(&self) -> LocationSummary {
        self.locations
            .iter()
            .fold(LocationSummary::default(), |mut acc, loc| {
                acc.total += 1;
                match loc.status {
                    LocationStatus::Online => acc.online += 1,
                    LocationStatus::Warning => acc.warning += 1,
                    LocationStatus::Offline => acc.offline += 1,
                }
                acc.routers = acc.routers.saturating_add(loc.routers);
                acc.active_users = acc.active_users.saturating_add(loc.active_users);
                acc
            })
    }
}
