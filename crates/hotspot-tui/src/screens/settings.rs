//! Settings screen: General / Account / Notifications / Security sections
//! over a draft/commit settings editor.

use std::cell::Cell;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tracing::{debug, warn};

use hotspot_core::{SettingsEditor, SettingsFlag, SettingsText, SystemSettings};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{self, FieldState};
use crate::widgets::{header, sub_tabs};

const TAB_LABELS: [&str; 4] = ["General", "Account", "Notifications", "Security"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsRow {
    Text(SettingsText),
    Flag(SettingsFlag),
}

pub struct SettingsScreen {
    focused: bool,
    editor: SettingsEditor,
    tab: usize,
    row: usize,
    /// Text buffer while a field is being edited.
    editing: Option<String>,
    tabs_area: Cell<Rect>,
}

impl SettingsScreen {
    pub fn new(settings: SystemSettings) -> Self {
        Self {
            focused: false,
            editor: SettingsEditor::new(settings),
            tab: 0,
            row: 0,
            editing: None,
            tabs_area: Cell::new(Rect::default()),
        }
    }

    fn rows(&self) -> Vec<SettingsRow> {
        match self.tab {
            0 => vec![
                SettingsRow::Text(SettingsText::SystemName),
                SettingsRow::Text(SettingsText::Timezone),
                SettingsRow::Flag(SettingsFlag::AutoRefresh),
                SettingsRow::Flag(SettingsFlag::ShowOfflineRouters),
                SettingsRow::Flag(SettingsFlag::AutoDeleteExpired),
                SettingsRow::Flag(SettingsFlag::ArchiveLogs),
            ],
            1 => [
                SettingsText::FullName,
                SettingsText::Email,
                SettingsText::Phone,
                SettingsText::Role,
            ]
            .into_iter()
            .map(SettingsRow::Text)
            .collect(),
            2 => (0..self.editor.draft().notifications.len())
                .map(|i| SettingsRow::Flag(SettingsFlag::Notification(i)))
                .collect(),
            _ => vec![
                SettingsRow::Flag(SettingsFlag::TwoFactor),
                SettingsRow::Flag(SettingsFlag::SessionTimeout),
            ],
        }
    }

    fn current_row(&self) -> Option<SettingsRow> {
        self.rows().get(self.row).copied()
    }

    fn select_tab(&mut self, tab: usize) {
        if tab != self.tab {
            self.tab = tab;
            self.row = 0;
        }
    }

    fn cycle_tab(&mut self, forward: bool) {
        let len = TAB_LABELS.len();
        let next = if forward {
            (self.tab + 1) % len
        } else {
            (self.tab + len - 1) % len
        };
        self.select_tab(next);
    }

    fn move_row(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        self.row = self.row.saturating_add_signed(delta).min(len - 1);
    }

    fn toggle_current(&mut self) {
        if let Some(SettingsRow::Flag(flag)) = self.current_row() {
            if let Some(value) = self.editor.toggle(flag) {
                debug!(?flag, value, "setting toggled");
            }
        }
    }

    fn activate(&mut self) {
        match self.current_row() {
            Some(SettingsRow::Text(field)) => {
                self.editing = Some(self.editor.text(field).to_owned());
            }
            Some(SettingsRow::Flag(_)) => self.toggle_current(),
            None => {}
        }
    }

    fn sync_buffer(&mut self) {
        let (Some(SettingsRow::Text(field)), Some(buffer)) = (self.current_row(), self.editing.as_ref())
        else {
            return;
        };
        self.editor.set_text(field, buffer.clone());
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.editing = None;
            }
            code => {
                if let Some(buffer) = self.editing.as_mut() {
                    if form::edit_buffer(buffer, code) {
                        self.sync_buffer();
                    }
                }
            }
        }
    }

    fn save(&mut self) -> Action {
        match self.editor.save() {
            Ok(saved) => {
                debug!(system = %saved.general.system_name, "settings committed");
                Action::Notify(
                    Notification::success("Settings Saved")
                        .with_detail("Your settings have been updated successfully."),
                )
            }
            Err(e) => {
                warn!(error = %e, "settings save rejected");
                Action::Notify(Notification::from_error("Settings not saved", &e))
            }
        }
    }

    fn flag_text(&self, flag: SettingsFlag) -> (&str, &str) {
        match flag {
            SettingsFlag::AutoRefresh => ("Auto Refresh", "Refresh dashboard data every 30 seconds"),
            SettingsFlag::ShowOfflineRouters => ("Show Offline Routers", "Display offline routers in lists"),
            SettingsFlag::AutoDeleteExpired => ("Auto-delete Expired", "Remove expired vouchers after 30 days"),
            SettingsFlag::ArchiveLogs => ("Archive Logs", "Keep activity logs for 90 days"),
            SettingsFlag::Notification(i) => self
                .editor
                .draft()
                .notifications
                .get(i)
                .map_or(("", ""), |rule| (rule.title.as_str(), rule.description.as_str())),
            SettingsFlag::TwoFactor => ("Two-Factor Authentication", "Require a code at sign-in"),
            SettingsFlag::SessionTimeout => ("Session Timeout", "Sign out after 30 minutes idle"),
        }
    }

    fn render_rows(&self, frame: &mut Frame, area: Rect) {
        let mut y = area.y;
        for (i, row) in self.rows().into_iter().enumerate() {
            let active = i == self.row;
            let height = match row {
                SettingsRow::Text(_) => 4,
                SettingsRow::Flag(_) => 1,
            };
            if y + height > area.bottom() {
                break;
            }
            let slot = Rect::new(area.x, y, area.width.min(60), height);
            match row {
                SettingsRow::Text(field) => {
                    let state = match (active, self.editing.is_some()) {
                        (true, true) => FieldState::Editing,
                        (true, false) => FieldState::Focused,
                        (false, _) => FieldState::Idle,
                    };
                    form::render_input_field(frame, slot, field.label(), self.editor.text(field), state);
                }
                SettingsRow::Flag(flag) => {
                    let (label, desc) = self.flag_text(flag);
                    let value = self.editor.flag(flag).unwrap_or(false);
                    frame.render_widget(
                        Paragraph::new(form::toggle_line(label, Some(desc), value, active)),
                        Rect::new(area.x, y, area.width, 1),
                    );
                }
            }
            y += height;
        }
    }
}

impl Component for SettingsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing.is_some() {
            self.handle_editing_key(key);
            return Ok(None);
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_row(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_row(-1);
                None
            }
            KeyCode::Char('l' | ']') | KeyCode::Right => {
                self.cycle_tab(true);
                None
            }
            KeyCode::Char('h' | '[') | KeyCode::Left => {
                self.cycle_tab(false);
                None
            }
            KeyCode::Enter => {
                self.activate();
                None
            }
            KeyCode::Char(' ') => {
                self.toggle_current();
                None
            }
            KeyCode::Char('s') => Some(self.save()),
            KeyCode::Char('u') => {
                self.editor.revert();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let area = self.tabs_area.get();
            if area.contains(Position::new(mouse.column, mouse.row)) {
                if let Some(i) = sub_tabs::tab_at(&TAB_LABELS, self.tab, mouse.column - area.x) {
                    self.select_tab(i);
                }
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::Paste(text) = action {
            if let Some(buffer) = self.editing.as_mut() {
                buffer.push_str(text.trim_end_matches(['\r', '\n']));
                self.sync_buffer();
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(header::HEIGHT),
            Constraint::Length(1), // sub-tabs
            Constraint::Min(4),    // section
            Constraint::Length(1), // hints
        ])
        .split(area);

        header::render_header(frame, layout[0], "Settings", "Configure your HotSpot Pro system");

        let tabs_area = Rect::new(layout[1].x + 1, layout[1].y, layout[1].width.saturating_sub(1), 1);
        self.tabs_area.set(tabs_area);
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&TAB_LABELS, self.tab)),
            tabs_area,
        );

        let title = if self.editor.is_dirty() {
            format!(" {} \u{25cf} unsaved ", TAB_LABELS[self.tab])
        } else {
            format!(" {} ", TAB_LABELS[self.tab])
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));
        let inner = block.inner(layout[2]);
        frame.render_widget(block, layout[2]);
        self.render_rows(frame, inner);

        let hints = if self.editing.is_some() {
            Line::from(vec![
                Span::styled("  Enter/Esc ", theme::key_hint_key()),
                Span::styled("done", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled("  h/l ", theme::key_hint_key()),
                Span::styled("section  ", theme::key_hint()),
                Span::styled("j/k ", theme::key_hint_key()),
                Span::styled("field  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("edit/toggle  ", theme::key_hint()),
                Span::styled("s ", theme::key_hint_key()),
                Span::styled("save  ", theme::key_hint()),
                Span::styled("u ", theme::key_hint_key()),
                Span::styled("revert", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(hints), layout[3]);
    }

    fn captures_input(&self) -> bool {
        self.editing.is_some()
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Settings"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::action::NotificationLevel;
    use crossterm::event::KeyModifiers;
    use hotspot_core::Seed;
    use pretty_assertions::assert_eq;

    fn screen() -> SettingsScreen {
        SettingsScreen::new(Seed::builtin().settings)
    }

    fn press(s: &mut SettingsScreen, code: KeyCode) -> Option<Action> {
        s.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn notification(action: Option<Action>) -> Notification {
        match action {
            Some(Action::Notify(n)) => n,
            other => panic!("expected a notification, got {other:?}"),
        }
    }

    #[test]
    fn invalid_email_is_rejected() {
        let mut s = screen();
        press(&mut s, KeyCode::Char('l')); // Account
        press(&mut s, KeyCode::Char('j')); // Email
        press(&mut s, KeyCode::Enter);
        assert!(s.captures_input());
        for _ in 0.."admin@hotspot-pro.com".len() {
            press(&mut s, KeyCode::Backspace);
        }
        for c in "nobody".chars() {
            press(&mut s, KeyCode::Char(c));
        }
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.editor.text(SettingsText::Email), "nobody");

        let n = notification(press(&mut s, KeyCode::Char('s')));
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.title, "Settings not saved");
        assert_eq!(s.editor.committed().account.email, "admin@hotspot-pro.com");
        assert!(s.editor.is_dirty());
    }

    #[test]
    fn save_commits_draft() {
        let mut s = screen();
        press(&mut s, KeyCode::Enter); // System Name
        s.update(&Action::Paste(" East\n".into())).unwrap();
        press(&mut s, KeyCode::Esc);
        press(&mut s, KeyCode::Char(']'));
        press(&mut s, KeyCode::Char(']')); // Notifications
        press(&mut s, KeyCode::Char('j'));
        press(&mut s, KeyCode::Char('j'));
        press(&mut s, KeyCode::Char('j'));
        press(&mut s, KeyCode::Char('j'));
        press(&mut s, KeyCode::Char(' ')); // System Updates

        let n = notification(press(&mut s, KeyCode::Char('s')));
        assert_eq!(n.title, "Settings Saved");
        assert_eq!(n.detail.as_deref(), Some("Your settings have been updated successfully."));
        let committed = s.editor.committed();
        assert_eq!(committed.general.system_name, "HotSpot Pro East");
        assert!(committed.notifications[4].enabled);
        assert!(!s.editor.is_dirty());
    }

    #[test]
    fn switching_sections_resets_row_and_revert_drops_draft() {
        let mut s = screen();
        press(&mut s, KeyCode::Char('j'));
        press(&mut s, KeyCode::Char('j'));
        press(&mut s, KeyCode::Enter); // Auto Refresh off
        assert!(s.editor.is_dirty());
        press(&mut s, KeyCode::Char('h')); // wraps to Security
        assert_eq!(s.tab, 3);
        assert_eq!(s.row, 0);
        press(&mut s, KeyCode::Char('u'));
        assert!(!s.editor.is_dirty());
    }
}
