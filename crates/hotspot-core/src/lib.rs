//! Domain model and panel state for the HotSpot Pro dashboard.
//!
//! This crate owns everything the terminal UI renders and mutates, with no
//! dependency on the UI itself:
//!
//! - **Domain model** ([`model`]): vouchers, locations, routers, DHCP
//!   leases, voucher templates, remote sessions, dashboard metrics, and
//!   system settings, all keyed by [`EntityId`].
//!
//! - **[`Seed`]**: the explicit bundle of initial data every panel is
//!   built from. [`Seed::builtin()`] ships the stock demo data; any other
//!   source (a TOML file, a future backend) produces the same type.
//!
//! - **Panel state holders**: [`ViewRouter`] and [`Sidebar`] for
//!   navigation, [`VoucherBook`] for search/filter, [`TemplateEditor`] and
//!   [`SettingsEditor`] for draft/commit editing, [`CopyFeedback`] for the
//!   transient "copied" marker, and [`RebootFlow`] for the router reboot
//!   confirmation state machine.
//!
//! - **[`ScheduledTask`]**: owner-scoped, cancellable delayed messages
//!   used for every timer in the UI.
//!
//! - **Seams**: [`Clipboard`] and the import/export traits in
//!   [`transfer`] are the only boundary-facing affordances.

pub mod clipboard;
pub mod error;
pub mod feedback;
pub mod locations;
pub mod model;
pub mod nav;
pub mod reboot;
pub mod router;
pub mod schedule;
pub mod seed;
pub mod settings;
pub mod templates;
pub mod transfer;
pub mod vouchers;

// ── Primary re-exports ──────────────────────────────────────────────
pub use clipboard::Clipboard;
pub use error::CoreError;
pub use feedback::CopyFeedback;
pub use locations::{LocationBook, LocationSummary};
pub use nav::{PanelId, Sidebar, ViewRouter};
pub use reboot::{RebootFlow, RebootState};
pub use router::RouterPanel;
pub use schedule::ScheduledTask;
pub use seed::Seed;
pub use settings::{SettingsEditor, SettingsFlag, SettingsText};
pub use templates::{Selection, TemplateEditor, TemplateStore};
pub use transfer::{ConfigBackup, TransferKind, Unwired, VoucherExporter, VoucherImporter};
pub use vouchers::{VoucherBook, VoucherCounts};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Activity, ActivityStatus, DhcpLease, EntityId, Location, LocationStatus, NetworkMetric,
    RemoteSession, RemoteSettings, Router, RouterDetails, RouterStatus, SessionStatus,
    StatCard, StatVariant, SystemSettings, TemplateEdit, TemplateField, Trend, Voucher, VoucherStatus,
    VoucherTemplate,
};
