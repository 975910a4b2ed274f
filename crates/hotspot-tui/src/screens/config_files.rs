//! Config Files screen: voucher import/export and router config
//! backup/restore, each routed through a transfer seam.

use std::path::PathBuf;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tracing::{info, warn};

use hotspot_core::{ConfigBackup, CoreError, TransferKind, Voucher, VoucherExporter, VoucherImporter};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::header;

/// The collaborators behind each transfer operation.
pub struct Transfers {
    pub importer: Box<dyn VoucherImporter + Send>,
    pub exporter: Box<dyn VoucherExporter + Send>,
    pub backup: Box<dyn ConfigBackup + Send>,
}

pub struct ConfigFilesScreen {
    focused: bool,
    transfers: Transfers,
    vouchers: Vec<Voucher>,
    /// Router whose configuration backup/restore targets.
    router: String,
    selected: usize,
}

impl ConfigFilesScreen {
    pub fn new(transfers: Transfers, vouchers: Vec<Voucher>, router: String) -> Self {
        Self {
            focused: false,
            transfers,
            vouchers,
            router,
            selected: 0,
        }
    }

    fn file_for(&self, kind: TransferKind) -> PathBuf {
        let stem = match kind {
            TransferKind::VoucherImport | TransferKind::VoucherExport => "vouchers".to_owned(),
            TransferKind::ConfigBackup | TransferKind::ConfigRestore => {
                self.router.to_lowercase().replace(' ', "-")
            }
        };
        PathBuf::from(format!("{stem}.{}", kind.extension()))
    }

    fn run(&mut self, kind: TransferKind) -> Result<String, CoreError> {
        let path = self.file_for(kind);
        match kind {
            TransferKind::VoucherImport => {
                let imported = self.transfers.importer.import(&path)?;
                let count = imported.len();
                self.vouchers.extend(imported);
                Ok(format!("Imported {count} vouchers from {}", path.display()))
            }
            TransferKind::VoucherExport => {
                self.transfers.exporter.export(&self.vouchers, &path)?;
                Ok(format!(
                    "Exported {} vouchers to {}",
                    self.vouchers.len(),
                    path.display()
                ))
            }
            TransferKind::ConfigBackup => {
                self.transfers.backup.backup(&self.router, &path)?;
                Ok(format!("{} saved to {}", self.router, path.display()))
            }
            TransferKind::ConfigRestore => {
                self.transfers.backup.restore(&self.router, &path)?;
                Ok(format!("{} restored from {}", self.router, path.display()))
            }
        }
    }

    fn activate(&mut self) -> Option<Action> {
        let kind = *TransferKind::ALL.get(self.selected)?;
        let notification = match self.run(kind) {
            Ok(detail) => {
                info!(%kind, "transfer complete");
                Notification::success(kind.title()).with_detail(detail)
            }
            Err(e) => {
                warn!(%kind, error = %e, "transfer failed");
                Notification::from_error(kind.title(), &e)
            }
        };
        Some(Action::Notify(notification))
    }
}

impl Component for ConfigFilesScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let last = TransferKind::ALL.len() - 1;
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = (self.selected + 1).min(last);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Enter => self.activate(),
            _ => None,
        };
        Ok(action)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(header::HEIGHT),
            Constraint::Min(4),
        ])
        .split(area);
        header::render_header(
            frame,
            layout[0],
            "Config Files",
            "Import, export and back up vouchers and router configuration",
        );

        let block = Block::default()
            .title(" File Operations ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));
        let inner = block.inner(layout[1]);
        frame.render_widget(block, layout[1]);

        let mut lines = Vec::with_capacity(TransferKind::ALL.len() * 3 + 1);
        for (i, kind) in TransferKind::ALL.into_iter().enumerate() {
            let active = i == self.selected;
            let (marker, title_style) = if active {
                (
                    "\u{25b8} ",
                    Style::default()
                        .fg(theme::NEON_CYAN)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default().fg(theme::DIM_WHITE))
            };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme::ELECTRIC_PURPLE)),
                Span::styled(kind.title(), title_style),
                Span::styled(
                    format!("  {}", self.file_for(kind).display()),
                    Style::default().fg(theme::CORAL),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", kind.description()),
                theme::key_hint(),
            )));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("select  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("run", theme::key_hint()),
        ]));
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "ConfigFiles"
    }
}
