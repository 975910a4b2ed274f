//! Template Designer screen: field editor on the left, live voucher
//! preview on the right. Every keystroke lands in the editor's draft, and
//! the preview is drawn from the draft.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use hotspot_core::{TemplateEditor, TemplateField, TemplateStore, VoucherTemplate};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{self, FieldState};
use crate::widgets::{header, sub_tabs};

pub struct TemplatesScreen {
    focused: bool,
    editor: TemplateEditor,
    fields: Vec<TemplateField>,
    field_index: usize,
    /// Text buffer while a field is being edited.
    editing: Option<String>,
}

impl TemplatesScreen {
    pub fn new(templates: Vec<VoucherTemplate>) -> Self {
        Self {
            focused: false,
            editor: TemplateEditor::new(TemplateStore::new(templates)),
            fields: TemplateField::iter().collect(),
            field_index: 0,
            editing: None,
        }
    }

    fn current_field(&self) -> Option<TemplateField> {
        self.fields.get(self.field_index).copied()
    }

    fn move_field(&mut self, delta: isize) {
        if self.fields.is_empty() {
            return;
        }
        self.field_index = self
            .field_index
            .saturating_add_signed(delta)
            .min(self.fields.len() - 1);
    }

    /// Switch the draft to the neighbouring stored template.
    fn cycle_template(&mut self, delta: isize) -> Option<Action> {
        let len = self.editor.store().len();
        if len == 0 {
            return None;
        }
        let current = self.editor.selected_index().unwrap_or(0);
        let len_signed = isize::try_from(len).ok()?;
        let current_signed = isize::try_from(current).ok()?;
        let next = usize::try_from((current_signed + delta).rem_euclid(len_signed)).ok()?;
        let id = self.editor.store().get_index(next)?.id.clone();

        match self.editor.select(&id) {
            Ok(selection) if selection.discarded => Some(Action::Notify(
                Notification::info("Edits discarded")
                    .with_detail("Unsaved template changes were thrown away."),
            )),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "template select failed");
                Some(Action::Notify(Notification::from_error("Template not found", &e)))
            }
        }
    }

    fn begin_edit(&mut self) {
        let Some(field) = self.current_field() else {
            return;
        };
        if let Some(value) = self.editor.draft().and_then(|d| d.text(field)) {
            self.editing = Some(value.to_owned());
        }
    }

    fn toggle_flag(&mut self) {
        let Some(field) = self.current_field() else {
            return;
        };
        let Some(current) = self.editor.draft().and_then(|d| d.flag(field)) else {
            return;
        };
        if let Some(edit) = field.flag_edit(!current) {
            self.editor.update(edit);
        }
    }

    /// Push the edit buffer into the draft so the preview follows along.
    fn sync_buffer(&mut self) {
        let (Some(field), Some(buffer)) = (self.current_field(), self.editing.as_ref()) else {
            return;
        };
        if let Some(edit) = field.text_edit(buffer.clone()) {
            self.editor.update(edit);
        }
    }

    fn save(&mut self) -> Action {
        match self.editor.save() {
            Ok(saved) => {
                debug!(template = %saved.id, "template committed");
                Action::Notify(
                    Notification::success("Template Saved")
                        .with_detail("Your voucher template has been updated."),
                )
            }
            Err(e) => {
                warn!(error = %e, "template save rejected");
                Action::Notify(Notification::from_error("Template not saved", &e))
            }
        }
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

    // ── Rendering ────────────────────────────────────────────────────

    fn render_editor(&self, frame: &mut Frame, area: Rect, draft: &VoucherTemplate) {
        let title = if self.editor.is_dirty() {
            " Template Editor \u{25cf} unsaved "
        } else {
            " Template Editor "
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let names: Vec<&str> = self.editor.store().iter().map(|t| t.name.as_str()).collect();
        let active = self.editor.selected_index().unwrap_or(0);

        let field_rows = u16::try_from(self.fields.len()).unwrap_or(u16::MAX);
        let layout = Layout::vertical([
            Constraint::Length(1),          // template picker
            Constraint::Length(1),          // spacer
            Constraint::Length(field_rows), // fields
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(
                [Span::styled(" Template ", theme::key_hint())]
                    .into_iter()
                    .chain(sub_tabs::render_sub_tabs(&names, active).spans)
                    .collect::<Vec<_>>(),
            )),
            layout[0],
        );

        for (i, field) in self.fields.iter().enumerate() {
            let row = Rect::new(
                layout[2].x,
                layout[2].y + u16::try_from(i).unwrap_or(0),
                layout[2].width,
                1,
            );
            if row.y >= layout[2].bottom() {
                break;
            }
            let is_active = i == self.field_index;
            let label = field.to_string();
            if let Some(on) = draft.flag(*field) {
                frame.render_widget(
                    Paragraph::new(form::toggle_line(&label, None, on, is_active)),
                    row,
                );
            } else {
                let state = match (is_active, self.editing.is_some()) {
                    (true, true) => FieldState::Editing,
                    (true, false) => FieldState::Focused,
                    (false, _) => FieldState::Idle,
                };
                let value = draft.text(*field).unwrap_or_default();
                form::render_inline_field(frame, row, &label, value, state);
            }
        }

        let hints = if self.editing.is_some() {
            Line::from(vec![
                Span::styled("  Enter/Esc ", theme::key_hint_key()),
                Span::styled("done", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled("  h/l ", theme::key_hint_key()),
                Span::styled("template  ", theme::key_hint()),
                Span::styled("j/k ", theme::key_hint_key()),
                Span::styled("field  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("edit  ", theme::key_hint()),
                Span::styled("s ", theme::key_hint_key()),
                Span::styled("save  ", theme::key_hint()),
                Span::styled("u ", theme::key_hint_key()),
                Span::styled("revert", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(hints), layout[4]);
    }

    fn render_preview(frame: &mut Frame, area: Rect, draft: &VoucherTemplate) {
        let outer = Block::default()
            .title(" Live Preview ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let bg = theme::hex(&draft.background_color, theme::BG_DARK);
        let fg = theme::hex(&draft.text_color, theme::DIM_WHITE);
        let accent = theme::hex(&draft.accent_color, theme::NEON_CYAN);

        let card_width = 36u16.min(inner.width);
        let card_height = 16u16.min(inner.height);
        let card = Rect::new(
            inner.x + inner.width.saturating_sub(card_width) / 2,
            inner.y + inner.height.saturating_sub(card_height) / 2,
            card_width,
            card_height,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent).bg(bg))
            .style(Style::default().bg(bg));
        let card_inner = block.inner(card);
        frame.render_widget(block, card);

        let mut lines: Vec<Line> = Vec::new();
        if draft.show_logo {
            lines.push(Line::from(Span::styled(
                " HP ",
                Style::default().fg(bg).bg(accent).add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(Span::styled(
            draft.header_text.clone(),
            Style::default().fg(fg).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "\u{2500}".repeat(usize::from(card_inner.width.saturating_sub(2))),
            Style::default().fg(accent),
        )));
        lines.push(Line::from(Span::styled("ACCESS CODE", Style::default().fg(accent))));
        lines.push(Line::from(Span::styled(
            "HSP-DEMO-1234",
            Style::default().fg(fg).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Duration ", Style::default().fg(fg).add_modifier(Modifier::DIM)),
            Span::styled("24 Hours", Style::default().fg(fg)),
            Span::styled("   Speed ", Style::default().fg(fg).add_modifier(Modifier::DIM)),
            Span::styled("10 Mbps", Style::default().fg(fg)),
        ]));
        if draft.show_qr {
            lines.push(Line::from(""));
            lines.extend(qr_placeholder(fg, bg));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            draft.footer_text.clone(),
            Style::default().fg(fg).add_modifier(Modifier::ITALIC),
        )));

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(Style::default().bg(bg)),
            card_inner,
        );
    }
}

/// A small block pattern standing in for the QR code.
fn qr_placeholder(fg: Color, bg: Color) -> Vec<Line<'static>> {
    ["\u{2588}\u{2580}\u{2588} \u{2584}\u{2580}", "\u{2584}\u{2580} \u{2588}\u{2584}\u{2588}", "\u{2588}\u{2584}\u{2580}\u{2580}\u{2588} "]
        .into_iter()
        .map(|row| Line::from(Span::styled(row, Style::default().fg(fg).bg(bg))))
        .collect()
}

impl Component for TemplatesScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing.is_some() {
            self.handle_editing_key(key);
            return Ok(None);
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_field(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_field(-1);
                None
            }
            KeyCode::Char('h') | KeyCode::Left => self.cycle_template(-1),
            KeyCode::Char('l') | KeyCode::Right => self.cycle_template(1),
            KeyCode::Enter => {
                if self.current_field().is_some_and(TemplateField::is_flag) {
                    self.toggle_flag();
                } else {
                    self.begin_edit();
                }
                None
            }
            KeyCode::Char(' ') => {
                self.toggle_flag();
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
            Constraint::Min(6),
        ])
        .split(area);
        header::render_header(
            frame,
            layout[0],
            "Template Designer",
            "Design and customize voucher templates",
        );

        let Some(draft) = self.editor.draft() else {
            frame.render_widget(
                Paragraph::new(Span::styled("  No templates defined", theme::key_hint())),
                layout[1],
            );
            return;
        };

        let cols = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(layout[1]);
        self.render_editor(frame, cols[0], draft);
        Self::render_preview(frame, cols[1], draft);
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
        "Templates"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use hotspot_core::{EntityId, Seed};
    use pretty_assertions::assert_eq;

    fn screen() -> TemplatesScreen {
        TemplatesScreen::new(Seed::builtin().templates)
    }

    fn press(s: &mut TemplatesScreen, code: KeyCode) -> Option<Action> {
        s.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_text(s: &mut TemplatesScreen, text: &str) {
        for c in text.chars() {
            press(s, KeyCode::Char(c));
        }
    }

    fn draft(s: &TemplatesScreen) -> &VoucherTemplate {
        s.editor.draft().unwrap()
    }

    #[test]
    fn typing_updates_the_draft_live() {
        let mut s = screen();
        press(&mut s, KeyCode::Char('j')); // header text
        press(&mut s, KeyCode::Enter);
        assert!(s.captures_input());

        // Global keys are plain text while editing.
        type_text(&mut s, " q1");
        assert_eq!(draft(&s).header_text, "WiFi Hotspot Voucher q1");
        press(&mut s, KeyCode::Backspace);
        assert_eq!(draft(&s).header_text, "WiFi Hotspot Voucher q");

        press(&mut s, KeyCode::Enter);
        assert!(!s.captures_input());
        assert!(s.editor.is_dirty());
    }

    #[test]
    fn save_then_reselect_round_trips() {
        let mut s = screen();
        press(&mut s, KeyCode::Enter); // name
        for _ in 0.."Default Template".len() {
            press(&mut s, KeyCode::Backspace);
        }
        type_text(&mut s, "Lobby");
        press(&mut s, KeyCode::Esc);
        press(&mut s, KeyCode::Char('G')); // ignored
        for _ in 0..6 {
            press(&mut s, KeyCode::Char('j'));
        }
        press(&mut s, KeyCode::Char(' ')); // show logo off
        let saved = draft(&s).clone();

        let action = press(&mut s, KeyCode::Char('s'));
        assert!(matches!(action, Some(Action::Notify(ref n)) if n.title == "Template Saved"));

        press(&mut s, KeyCode::Char('l'));
        press(&mut s, KeyCode::Char('h'));
        assert_eq!(draft(&s), &saved);
        assert_eq!(draft(&s).name, "Lobby");
        assert!(!draft(&s).show_logo);
    }

    #[test]
    fn switching_templates_discards_and_reports() {
        let mut s = screen();
        press(&mut s, KeyCode::Char(' ')); // name is text: no-op
        press(&mut s, KeyCode::Char('G'));
        for _ in 0..7 {
            press(&mut s, KeyCode::Down);
        }
        press(&mut s, KeyCode::Enter); // show QR off
        assert!(s.editor.is_dirty());

        let action = press(&mut s, KeyCode::Char('l'));
        assert!(matches!(action, Some(Action::Notify(ref n)) if n.title == "Edits discarded"));
        assert_eq!(draft(&s).id, EntityId::from("2"));

        press(&mut s, KeyCode::Char('h'));
        assert!(draft(&s).show_qr);
        assert_eq!(press(&mut s, KeyCode::Char('l')), None);
    }

    #[test]
    fn malformed_color_is_rejected_and_store_untouched() {
        let mut s = screen();
        for _ in 0..3 {
            press(&mut s, KeyCode::Char('j'));
        }
        press(&mut s, KeyCode::Enter); // background color
        type_text(&mut s, "zz");
        press(&mut s, KeyCode::Enter);

        let action = press(&mut s, KeyCode::Char('s'));
        match action {
            Some(Action::Notify(n)) => {
                assert_eq!(n.title, "Template not saved");
                assert!(n.detail.unwrap().contains("background color"));
            }
            other => panic!("expected a notification, got {other:?}"),
        }
        let stored = s.editor.store().get(&EntityId::from("1")).unwrap();
        assert_eq!(stored.background_color, "#1a1f2e");

        press(&mut s, KeyCode::Char('u'));
        assert!(!s.editor.is_dirty());
    }

    #[test]
    fn paste_appends_only_while_editing() {
        let mut s = screen();
        s.update(&Action::Paste("ignored".into())).unwrap();
        assert_eq!(draft(&s).name, "Default Template");

        press(&mut s, KeyCode::Enter);
        s.update(&Action::Paste(" v2\n".into())).unwrap();
        assert_eq!(draft(&s).name, "Default Template v2");
    }
}
