// ── Location domain types ──

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use strum::{Display, EnumIter};

use super::entity_id::EntityId;

/// Reachability of a hotspot location.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LocationStatus {
    Online,
    Offline,
    Warning,
}

impl LocationStatus {
    /// Badge text shown next to a location.
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Warning => "Issues",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: EntityId,
    pub name: String,
    pub address: String,
    pub status: LocationStatus,
    /// Number of routers deployed at this location.
    pub routers: u32,
    pub active_users: u32,
    /// Gateway address of the location's edge router.
    pub router_ip: IpAddr,
}
