// ── Router / DHCP domain types ──

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use strum::{Display, EnumIter};

use super::entity_id::EntityId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RouterStatus {
    Online,
    Offline,
    Warning,
}

/// A managed edge router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Router {
    pub id: EntityId,
    pub name: String,
    pub ip: IpAddr,
    pub model: String,
    pub status: RouterStatus,
}

/// A DHCP address assignment. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpLease {
    pub id: EntityId,
    pub mac: String,
    pub ip: IpAddr,
    pub hostname: String,
    /// Remaining lease time as reported by the router (e.g. "23:45:12").
    pub expires: String,
}

/// A label/value pair from the router's system information page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoItem {
    pub label: String,
    pub value: String,
}

/// Static health, DHCP server, and system details shown for the selected
/// router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterDetails {
    pub uptime: String,
    pub firmware: String,
    pub cpu_percent: u8,
    pub memory: String,
    pub memory_percent: u8,
    pub temperature_c: u8,
    pub bandwidth: String,
    pub bandwidth_percent: u8,
    pub dhcp_pool_start: IpAddr,
    pub dhcp_pool_end: IpAddr,
    pub lease_time: String,
    pub dns_servers: Vec<IpAddr>,
    pub dhcp_enabled: bool,
    pub system_info: Vec<InfoItem>,
}
