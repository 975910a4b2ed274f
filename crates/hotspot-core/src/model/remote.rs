// ── Remote access domain types ──

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use strum::{Display, EnumIter};

use super::entity_id::EntityId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    Connected,
    Disconnected,
}

/// A remote management session to a router. Static in this build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSession {
    pub id: EntityId,
    pub router_name: String,
    pub ip: IpAddr,
    pub status: SessionStatus,
    pub last_access: String,
    pub user: String,
}

/// Remote management switches and endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSettings {
    pub remote_enabled: bool,
    pub ddns_enabled: bool,
    pub ddns_hostname: String,
    pub remote_port: u16,
    pub api_endpoint: String,
    pub api_key: String,
}

impl RemoteSettings {
    /// API key with everything after the key prefix masked.
    pub fn masked_api_key(&self) -> String {
        let visible = self
            .api_key
            .char_indices()
            .filter(|(_, c)| *c == '_')
            .map(|(i, _)| i + 1)
            .last()
            .unwrap_or(0);
        let (prefix, rest) = self.api_key.split_at(visible);
        format!("{prefix}{}", "\u{2022}".repeat(rest.chars().count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_api_key_keeps_prefix_only() {
        let settings = RemoteSettings {
            remote_enabled: true,
            ddns_enabled: true,
            ddns_hostname: "hotspot-pro.ddns.net".into(),
            remote_port: 8291,
            api_endpoint: "https://api.hotspot-pro.ddns.net/v1".into(),
            api_key: "sk_live_abcd".into(),
        };
        assert_eq!(settings.masked_api_key(), "sk_live_\u{2022}\u{2022}\u{2022}\u{2022}");
    }
}
