//! Screen implementations. Each panel is a top-level Component.

pub mod config_files;
pub mod dashboard;
pub mod locations;
pub mod remote;
pub mod router;
pub mod settings;
pub mod templates;
pub mod vouchers;

use hotspot_config::TimingConfig;
use hotspot_core::{Clipboard, PanelId, Seed, Unwired};

use crate::component::Component;

/// Build one component per panel from the seed data.
pub fn create_screens(
    seed: Seed,
    timing: &TimingConfig,
    clipboard: Box<dyn Clipboard + Send>,
) -> Vec<(PanelId, Box<dyn Component>)> {
    let Seed {
        stats,
        network_metrics,
        activity,
        vouchers,
        locations,
        routers,
        router_details,
        leases,
        templates,
        sessions,
        remote,
        settings,
    } = seed;

    let backup_target = routers
        .first()
        .map_or_else(|| "Main Router".to_owned(), |r| r.name.clone());

    vec![
        (
            PanelId::Dashboard,
            Box::new(dashboard::DashboardScreen::new(stats, network_metrics, activity)),
        ),
        (
            PanelId::Vouchers,
            Box::new(vouchers::VouchersScreen::new(
                vouchers.clone(),
                clipboard,
                timing.copy_feedback(),
            )),
        ),
        (
            PanelId::Locations,
            Box::new(locations::LocationsScreen::new(locations)),
        ),
        (
            PanelId::Router,
            Box::new(router::RouterScreen::new(
                routers,
                router_details,
                leases,
                timing.reboot(),
            )),
        ),
        (
            PanelId::Templates,
            Box::new(templates::TemplatesScreen::new(templates)),
        ),
        (
            PanelId::Remote,
            Box::new(remote::RemoteScreen::new(remote, sessions)),
        ),
        (
            PanelId::Config,
            Box::new(config_files::ConfigFilesScreen::new(
                config_files::Transfers {
                    importer: Box::new(Unwired),
                    exporter: Box::new(Unwired),
                    backup: Box::new(Unwired),
                },
                vouchers,
                backup_target,
            )),
        ),
        (
            PanelId::Settings,
            Box::new(settings::SettingsScreen::new(settings)),
        ),
    ]
}
