// ── Domain model ──
//
// Canonical types for every entity the dashboard renders. All of them
// are plain data: serde-friendly so a seed file can supply them, and
// keyed by `EntityId` where the UI needs to address a single record.

pub mod dashboard;
pub mod entity_id;
pub mod location;
pub mod remote;
pub mod router;
pub mod settings;
pub mod template;
pub mod voucher;

pub use dashboard::{Activity, ActivityStatus, NetworkMetric, StatCard, StatVariant, Trend};
pub use entity_id::EntityId;
pub use location::{Location, LocationStatus};
pub use remote::{RemoteSession, RemoteSettings, SessionStatus};
pub use router::{DhcpLease, InfoItem, Router, RouterDetails, RouterStatus};
pub use settings::{
    AccountSettings, GeneralSettings, NotificationRule, SecuritySettings, SystemSettings,
};
pub use template::{TemplateEdit, TemplateField, VoucherTemplate, parse_hex_color};
pub use voucher::{Voucher, VoucherStatus};
