//! `hotspot-tui`: terminal admin dashboard for a WiFi hotspot billing
//! operation.
//!
//! Eight panels, selectable from the sidebar or with number keys (1-8):
//! Dashboard, Vouchers, Locations, Router Control, Templates, Remote
//! Access, Config Files, and Settings. All data comes from a [`Seed`]:
//! the built-in demo set, or a TOML seed file named in the config or on
//! the command line.
//!
//! Logs are written to a file to avoid corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, config loading, tracing setup,
//! panic hooks, and app launch.
//!
//! [`Seed`]: hotspot_core::Seed

mod action;
mod app;
mod clipboard;
mod component;
mod event;
mod screens;
mod sidebar;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use hotspot_config::Config;

use crate::app::App;
use crate::clipboard::Osc52Clipboard;

/// Terminal dashboard for managing hotspot vouchers, locations, and routers.
#[derive(Parser, Debug)]
#[command(name = "hotspot-tui", version, about)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(short = 'c', long, env = "HOTSPOT_CONFIG")]
    config: Option<PathBuf>,

    /// TOML seed file replacing the built-in demo data
    #[arg(short = 's', long)]
    seed: Option<PathBuf>,

    /// Panel to open at startup (dashboard, vouchers, locations, router,
    /// templates, remote, config, settings)
    #[arg(short = 'p', long)]
    panel: Option<String>,

    /// Log file path (overrides the config file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Fold command-line overrides into the loaded config.
    fn apply(&self, cfg: &mut Config) {
        if let Some(ref seed) = self.seed {
            cfg.seed_file = Some(seed.clone());
        }
        if let Some(ref panel) = self.panel {
            cfg.ui.initial_panel.clone_from(panel);
        }
        if let Some(ref log_file) = self.log_file {
            cfg.log.file.clone_from(log_file);
        }
    }
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr; that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(log_file: &std::path::Path, verbose: u8) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "hotspot_tui={log_level},hotspot_core={log_level},hotspot_config={log_level}"
        ))
    });

    let log_dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("hotspot-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let config_path = cli.config.clone().unwrap_or_else(hotspot_config::config_path);
    let mut cfg = hotspot_config::load_config_from(&config_path)
        .wrap_err_with(|| format!("loading config from {}", config_path.display()))?;
    cli.apply(&mut cfg);

    // Tracing to file. Hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cfg.log.file, cli.verbose);

    let seed = hotspot_config::resolve_seed(&cfg).wrap_err("loading seed data")?;

    info!(
        config = %config_path.display(),
        seed = cfg.seed_file.as_ref().map_or_else(|| "(built-in)".into(), |p| p.display().to_string()),
        panel = %cfg.ui.initial_panel(),
        "starting hotspot-tui"
    );

    let mut app = App::new(&cfg, seed, Box::new(Osc52Clipboard));
    app.run().await?;

    Ok(())
}
