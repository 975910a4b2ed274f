//! Remote Access screen: remote/DDNS switches, session list, and API key.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tracing::debug;

use hotspot_core::{RemoteSession, RemoteSettings, SessionStatus};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::{form, header};

pub struct RemoteScreen {
    focused: bool,
    settings: RemoteSettings,
    sessions: Vec<RemoteSession>,
    table_state: TableState,
}

impl RemoteScreen {
    pub fn new(settings: RemoteSettings, sessions: Vec<RemoteSession>) -> Self {
        let table_state = TableState::default().with_selected((!sessions.is_empty()).then_some(0));
        Self {
            focused: false,
            settings,
            sessions,
            table_state,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.sessions.is_empty() {
            return;
        }
        let next = self
            .table_state
            .selected()
            .unwrap_or(0)
            .saturating_add_signed(delta)
            .min(self.sessions.len() - 1);
        self.table_state.select(Some(next));
    }

    fn connect_selected(&self) -> Option<Action> {
        let session = self.sessions.get(self.table_state.selected()?)?;
        debug!(router = %session.router_name, "remote connect requested");
        Some(Action::Notify(
            Notification::info("Connecting...").with_detail(format!(
                "Establishing secure connection to {}",
                session.router_name
            )),
        ))
    }

    fn render_settings(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Remote Settings ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let s = &self.settings;
        let value = |text: String| Span::styled(text, Style::default().fg(theme::NEON_CYAN));
        let lines = vec![
            form::toggle_line(
                "Remote Access",
                Some("Enable remote management"),
                s.remote_enabled,
                false,
            ),
            form::toggle_line("DDNS Service", Some("Dynamic DNS updates"), s.ddns_enabled, false),
            Line::from(""),
            Line::from(vec![
                Span::styled("  DDNS Hostname  ", theme::key_hint()),
                value(s.ddns_hostname.clone()),
            ]),
            Line::from(vec![
                Span::styled("  Remote Port    ", theme::key_hint()),
                value(s.remote_port.to_string()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  API Endpoint   ", theme::key_hint()),
                value(s.api_endpoint.clone()),
            ]),
            Line::from(vec![
                Span::styled("  API Key        ", theme::key_hint()),
                Span::styled(s.masked_api_key(), Style::default().fg(theme::CORAL)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_sessions(&self, frame: &mut Frame, area: Rect) {
        let connected = self
            .sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Connected)
            .count();
        let block = Block::default()
            .title(format!(
                " Active Sessions ({connected}/{}) ",
                self.sessions.len()
            ))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));

        let header_row = Row::new(
            ["Router", "IP", "User", "Status", "Last Access"]
                .into_iter()
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = self
            .sessions
            .iter()
            .map(|session| {
                Row::new(vec![
                    Cell::from(session.router_name.clone()).style(
                        Style::default()
                            .fg(theme::NEON_CYAN)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Cell::from(session.ip.to_string()).style(Style::default().fg(theme::CORAL)),
                    Cell::from(session.user.clone()),
                    Cell::from(format!("\u{25cf} {}", session.status))
                        .style(Style::default().fg(theme::session_status(session.status))),
                    Cell::from(session.last_access.clone()).style(theme::key_hint()),
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Fill(2),
            Constraint::Length(15),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Fill(1),
        ];
        let table = Table::new(rows, widths)
            .header(header_row)
            .block(block)
            .row_highlight_style(theme::table_selected());
        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }
}

impl Component for RemoteScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('r') => {
                self.settings.remote_enabled = !self.settings.remote_enabled;
                debug!(enabled = self.settings.remote_enabled, "remote access toggled");
                None
            }
            KeyCode::Char('d') => {
                self.settings.ddns_enabled = !self.settings.ddns_enabled;
                debug!(enabled = self.settings.ddns_enabled, "ddns toggled");
                None
            }
            KeyCode::Enter => self.connect_selected(),
            KeyCode::Char('g') => Some(Action::Notify(
                Notification::success("API Key Generated")
                    .with_detail("A new API key has been generated."),
            )),
            _ => None,
        };
        Ok(action)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(header::HEIGHT),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);
        header::render_header(
            frame,
            layout[0],
            "Remote Access",
            "Manage remote connections to your routers",
        );

        let cols = Layout::horizontal([Constraint::Percentage(42), Constraint::Percentage(58)])
            .split(layout[1]);
        self.render_settings(frame, cols[0]);
        self.render_sessions(frame, cols[1]);

        let hints = Line::from(vec![
            Span::styled("  r ", theme::key_hint_key()),
            Span::styled("remote  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("DDNS  ", theme::key_hint()),
            Span::styled("j/k ", theme::key_hint_key()),
            Span::styled("session  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("connect  ", theme::key_hint()),
            Span::styled("g ", theme::key_hint_key()),
            Span::styled("generate key", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Remote"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use hotspot_core::Seed;

    fn screen() -> RemoteScreen {
        let seed = Seed::builtin();
        RemoteScreen::new(seed.remote, seed.sessions)
    }

    fn press(s: &mut RemoteScreen, code: KeyCode) -> Option<Action> {
        s.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn connect_names_the_selected_router() {
        let mut s = screen();
        press(&mut s, KeyCode::Char('j'));
        match press(&mut s, KeyCode::Enter) {
            Some(Action::Notify(n)) => {
                assert_eq!(n.title, "Connecting...");
                assert_eq!(
                    n.detail.as_deref(),
                    Some("Establishing secure connection to Branch A Router")
                );
            }
            other => panic!("expected a notification, got {other:?}"),
        }
    }

    #[test]
    fn switches_are_local_toggles() {
        let mut s = screen();
        assert!(s.settings.remote_enabled && s.settings.ddns_enabled);
        press(&mut s, KeyCode::Char('r'));
        press(&mut s, KeyCode::Char('d'));
        assert!(!s.settings.remote_enabled && !s.settings.ddns_enabled);
        assert_eq!(s.sessions, Seed::builtin().sessions);
    }
}
