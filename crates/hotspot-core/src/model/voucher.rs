// ── Voucher domain types ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::entity_id::EntityId;

/// Lifecycle state of a voucher code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VoucherStatus {
    Active,
    Used,
    Expired,
}

/// A time/bandwidth-limited hotspot access code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: EntityId,
    pub code: String,
    /// Human-readable validity window (e.g. "24 Hours").
    pub duration: String,
    /// Human-readable rate limit (e.g. "10 Mbps").
    pub bandwidth: String,
    pub status: VoucherStatus,
    pub created_at: NaiveDate,
    /// Name of the location the voucher was issued for.
    pub location: String,
}
