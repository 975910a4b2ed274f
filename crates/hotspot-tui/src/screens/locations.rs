//! Locations screen: status summary plus a location table with a detail
//! line for the selected row.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use hotspot_core::{CoreError, Location, LocationBook, LocationStatus};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::header;

pub struct LocationsScreen {
    focused: bool,
    book: LocationBook,
    table_state: TableState,
}

impl LocationsScreen {
    pub fn new(locations: Vec<Location>) -> Self {
        let book = LocationBook::new(locations);
        let mut table_state = TableState::default();
        if !book.is_empty() {
            table_state.select(Some(0));
        }
        Self {
            focused: false,
            book,
            table_state,
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn move_selection(&mut self, delta: isize) {
        if self.book.is_empty() {
            return;
        }
        let next = self
            .selected_index()
            .saturating_add_signed(delta)
            .min(self.book.len() - 1);
        self.table_state.select(Some(next));
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let summary = self.book.summary();
        let tiles: [(usize, &str, Color); 4] = [
            (summary.total, "Total Locations", theme::NEON_CYAN),
            (
                summary.online,
                LocationStatus::Online.label(),
                theme::location_status(LocationStatus::Online),
            ),
            (
                summary.warning,
                LocationStatus::Warning.label(),
                theme::location_status(LocationStatus::Warning),
            ),
            (
                summary.offline,
                LocationStatus::Offline.label(),
                theme::location_status(LocationStatus::Offline),
            ),
        ];

        let cols = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
        for ((count, label, color), tile_area) in tiles.into_iter().zip(cols.iter()) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color));
            let inner = block.inner(*tile_area);
            frame.render_widget(block, *tile_area);
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(
                        format!(" {count} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(label, theme::key_hint()),
                ])),
                inner,
            );
        }
    }

    fn detail_line(location: &Location) -> Line<'static> {
        Line::from(vec![
            Span::styled(" \u{25b8} ", Style::default().fg(theme::ELECTRIC_PURPLE)),
            Span::styled(
                location.name.clone(),
                Style::default()
                    .fg(theme::NEON_CYAN)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", location.address), theme::key_hint()),
            Span::styled(
                format!("  router {}", location.router_ip),
                Style::default().fg(theme::CORAL),
            ),
            Span::styled(
                format!(
                    "  {} routers \u{b7} {} users",
                    location.routers, location.active_users
                ),
                Style::default().fg(theme::DIM_WHITE),
            ),
        ])
    }
}

impl Component for LocationsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') => self.move_selection(isize::MIN),
            KeyCode::Char('G') => self.move_selection(isize::MAX),
            KeyCode::Char('a') => {
                return Ok(Some(Action::Notify(Notification::from_error(
                    "Add Location",
                    &CoreError::Unsupported {
                        operation: "Adding locations".into(),
                    },
                ))));
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(header::HEIGHT),
            Constraint::Length(3), // summary tiles
            Constraint::Min(4),    // table
        ])
        .split(area);

        header::render_header(frame, layout[0], "Locations", "Manage your hotspot locations");
        self.render_summary(frame, layout[1]);

        let summary = self.book.summary();
        let block = Block::default()
            .title(format!(
                " Sites \u{b7} {} routers \u{b7} {} active users ",
                summary.routers, summary.active_users
            ))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));
        let inner = block.inner(layout[2]);
        frame.render_widget(block, layout[2]);

        let body = Layout::vertical([
            Constraint::Min(1),    // table
            Constraint::Length(1), // detail
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let header_row = Row::new(
            ["Name", "Address", "Status", "Routers", "Users", "Router IP"]
                .into_iter()
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = self
            .book
            .all()
            .iter()
            .map(|loc| {
                let color = theme::location_status(loc.status);
                Row::new(vec![
                    Cell::from(loc.name.clone()).style(Style::default().fg(theme::NEON_CYAN)),
                    Cell::from(loc.address.clone()).style(theme::key_hint()),
                    Cell::from(format!("\u{25cf} {}", loc.status.label()))
                        .style(Style::default().fg(color)),
                    Cell::from(loc.routers.to_string()),
                    Cell::from(loc.active_users.to_string()),
                    Cell::from(loc.router_ip.to_string()).style(Style::default().fg(theme::CORAL)),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Fill(2),
            Constraint::Fill(3),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(15),
        ];
        let table = Table::new(rows, widths)
            .header(header_row)
            .row_highlight_style(theme::table_selected());
        let mut state = self.table_state;
        frame.render_stateful_widget(table, body[0], &mut state);

        if let Some(location) = self.book.get(self.selected_index()) {
            frame.render_widget(Paragraph::new(Self::detail_line(location)), body[1]);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("add location", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), body[2]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Locations"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use hotspot_core::Seed;

    #[test]
    fn selection_walks_and_clamps() {
        let mut s = LocationsScreen::new(Seed::builtin().locations);
        let press = |s: &mut LocationsScreen, c| {
            s.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
                .unwrap();
        };
        press(&mut s, 'j');
        press(&mut s, 'j');
        assert_eq!(s.selected_index(), 2);
        press(&mut s, 'G');
        assert_eq!(s.selected_index(), 4);
        press(&mut s, 'g');
        assert_eq!(s.selected_index(), 0);
        press(&mut s, 'k');
        assert_eq!(s.selected_index(), 0);
    }

    #[test]
    fn add_location_reports_unsupported() {
        let mut s = LocationsScreen::new(Seed::builtin().locations);
        let action = s
            .handle_key_event(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE))
            .unwrap();
        match action {
            Some(Action::Notify(n)) => {
                assert_eq!(n.title, "Add Location");
                assert_eq!(n.level, crate::action::NotificationLevel::Warning);
                assert_eq!(
                    n.detail.as_deref(),
                    Some("Adding locations is not available in this build")
                );
            }
            other => panic!("expected a notification, got {other:?}"),
        }
        assert_eq!(s.book.len(), 5);
    }
}
