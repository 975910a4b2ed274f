//! Vouchers screen: searchable voucher table with copy-to-clipboard.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use hotspot_core::{Clipboard, CopyFeedback, CoreError, EntityId, ScheduledTask, Voucher, VoucherBook};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::header;

pub struct VouchersScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    book: VoucherBook,
    table_state: TableState,
    feedback: CopyFeedback,
    clipboard: Box<dyn Clipboard + Send>,
    copy_timer: Option<ScheduledTask>,
    copy_delay: Duration,
}

impl VouchersScreen {
    pub fn new(
        vouchers: Vec<Voucher>,
        clipboard: Box<dyn Clipboard + Send>,
        copy_delay: Duration,
    ) -> Self {
        let book = VoucherBook::new(vouchers);
        let mut table_state = TableState::default();
        if !book.all().is_empty() {
            table_state.select(Some(0));
        }
        Self {
            focused: false,
            action_tx: None,
            book,
            table_state,
            feedback: CopyFeedback::new(),
            clipboard,
            copy_timer: None,
            copy_delay,
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected(&self) -> Option<&Voucher> {
        self.book.filtered().get(self.selected_index()).copied()
    }

    fn select(&mut self, idx: usize) {
        let len = self.book.filtered().len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(idx.min(len - 1)));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.book.filtered().len();
        if len == 0 {
            return;
        }
        let next = self
            .selected_index()
            .saturating_add_signed(delta)
            .min(len - 1);
        self.select(next);
    }

    /// Copy the selected voucher's code and arm the marker-clear timer.
    /// Arming replaces (and so cancels) any earlier timer.
    fn copy_selected(&mut self) -> Option<Action> {
        let (id, code): (EntityId, String) = {
            let voucher = self.selected()?;
            (voucher.id.clone(), voucher.code.clone())
        };
        match self.feedback.copy(self.clipboard.as_mut(), &code, &id) {
            Ok(generation) => {
                if let Some(tx) = &self.action_tx {
                    self.copy_timer = Some(ScheduledTask::after(
                        self.copy_delay,
                        tx.clone(),
                        Action::CopyFeedbackExpired { generation },
                    ));
                }
                Some(Action::Notify(
                    Notification::success("Copied!")
                        .with_detail("Voucher code copied to clipboard"),
                ))
            }
            Err(e) => Some(Action::Notify(Notification::from_error("Copy failed", &e))),
        }
    }

    /// Code of the voucher currently marked as copied.
    fn copied_code(&self) -> Option<&str> {
        let id = self.feedback.copied_id()?;
        self.book.get(id).ok().map(|v| v.code.as_str())
    }

    fn render_counts(&self, frame: &mut Frame, area: Rect) {
        let counts = self.book.counts();
        let line = Line::from(vec![
            Span::styled(
                " \u{25cf} ",
                Style::default().fg(theme::SUCCESS_GREEN),
            ),
            Span::styled(format!("{} active", counts.active), theme::table_row()),
            Span::styled("   \u{25cf} ", Style::default().fg(theme::BORDER_GRAY)),
            Span::styled(format!("{} used", counts.used), theme::table_row()),
            Span::styled("   \u{25cf} ", Style::default().fg(theme::ERROR_RED)),
            Span::styled(format!("{} expired", counts.expired), theme::table_row()),
            Span::styled(format!("   {} total", counts.total), theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for VouchersScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.select(0);
                Ok(None)
            }
            KeyCode::Char('G') => {
                self.select(usize::MAX);
                Ok(None)
            }
            KeyCode::Char('c') | KeyCode::Enter => Ok(self.copy_selected()),
            KeyCode::Char('i') => Ok(Some(Action::Notify(
                Notification::info("Import from Mikhmon")
                    .with_detail("Please upload your Mikhmon voucher export file (.csv)"),
            ))),
            KeyCode::Char('n') => Ok(Some(Action::Notify(Notification::from_error(
                "Generate Vouchers",
                &CoreError::Unsupported {
                    operation: "Voucher generation".into(),
                },
            )))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SearchInput(query) => {
                self.book.set_query(query.clone());
                debug!(query = %query, shown = self.book.filtered().len(), "voucher filter");
                self.select(0);
            }
            Action::CopyFeedbackExpired { generation } => {
                if self.feedback.expire(*generation) {
                    self.copy_timer = None;
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn search_query(&self) -> Option<&str> {
        Some(self.book.query())
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
            "Voucher Management",
            "Create, import and manage vouchers",
        );

        let filtered = self.book.filtered();
        let total = self.book.all().len();
        let title = if self.book.query().is_empty() {
            format!(" All Vouchers ({}/{total}) ", filtered.len())
        } else {
            format!(" All Vouchers ({}/{total}) [\"{}\"] ", filtered.len(), self.book.query())
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));

        let inner = block.inner(layout[1]);
        frame.render_widget(block, layout[1]);

        let body = Layout::vertical([
            Constraint::Length(1), // counts
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_counts(frame, body[0]);

        let header_row = Row::new(
            ["Code", "", "Duration", "Bandwidth", "Status", "Created", "Location"]
                .into_iter()
                .map(|h| Cell::from(h).style(theme::table_header())),
        );

        let selected = self.selected_index();
        let rows: Vec<Row> = filtered
            .iter()
            .enumerate()
            .map(|(i, voucher)| {
                let is_selected = i == selected;
                let copied = self.feedback.is_copied(&voucher.id);
                let copy_cell = if copied {
                    Cell::from("\u{2713} copied").style(Style::default().fg(theme::SUCCESS_GREEN))
                } else {
                    Cell::from("\u{29c9}").style(theme::key_hint())
                };
                let code_style = Style::default()
                    .fg(theme::NEON_CYAN)
                    .add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    });

                Row::new(vec![
                    Cell::from(voucher.code.clone()).style(code_style),
                    copy_cell,
                    Cell::from(voucher.duration.clone()),
                    Cell::from(voucher.bandwidth.clone()),
                    Cell::from(voucher.status.to_string())
                        .style(Style::default().fg(theme::voucher_status(voucher.status))),
                    Cell::from(voucher.created_at.format("%Y-%m-%d").to_string())
                        .style(theme::key_hint()),
                    Cell::from(voucher.location.clone()).style(Style::default().fg(theme::CORAL)),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Length(16), // code
            Constraint::Length(9),  // copy marker
            Constraint::Length(10), // duration
            Constraint::Length(10), // bandwidth
            Constraint::Length(8),  // status
            Constraint::Length(11), // created
            Constraint::Fill(1),    // location
        ];

        let table = Table::new(rows, widths)
            .header(header_row)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, body[1], &mut state);

        let mut hints = vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("c ", theme::key_hint_key()),
            Span::styled("copy code  ", theme::key_hint()),
            Span::styled("/ ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("i ", theme::key_hint_key()),
            Span::styled("import from Mikhmon  ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("generate", theme::key_hint()),
        ];
        if let Some(code) = self.copied_code() {
            hints.push(Span::styled(
                format!("   \u{2713} {code} copied"),
                Style::default().fg(theme::SUCCESS_GREEN),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(hints)), body[2]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Vouchers"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use crate::action::NotificationLevel;
    use hotspot_core::Seed;
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    #[derive(Clone, Default)]
    struct SharedClipboard(Arc<Mutex<Vec<String>>>);

    impl Clipboard for SharedClipboard {
        fn write(&mut self, text: &str) -> Result<(), CoreError> {
            self.0.lock().unwrap().push(text.to_owned());
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write(&mut self, _text: &str) -> Result<(), CoreError> {
            Err(CoreError::Clipboard {
                message: "terminal refused OSC 52".into(),
            })
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen(clipboard: Box<dyn Clipboard + Send>) -> VouchersScreen {
        VouchersScreen::new(Seed::builtin().vouchers, clipboard, Duration::from_secs(2))
    }

    #[test]
    fn search_input_filters_and_resets_selection() {
        let mut s = screen(Box::new(SharedClipboard::default()));
        s.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        s.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(s.selected_index(), 2);

        s.update(&Action::SearchInput("branch a".into())).unwrap();
        assert_eq!(s.selected_index(), 0);
        assert_eq!(s.book.filtered().len(), 2);

        s.update(&Action::SearchInput("nothing-matches".into())).unwrap();
        assert!(s.selected().is_none());
        assert_eq!(s.handle_key_event(key(KeyCode::Char('c'))).unwrap(), None);
    }

    #[test]
    fn selection_is_clamped_to_the_list() {
        let mut s = screen(Box::new(SharedClipboard::default()));
        s.handle_key_event(key(KeyCode::Char('k'))).unwrap();
        assert_eq!(s.selected_index(), 0);
        s.handle_key_event(key(KeyCode::Char('G'))).unwrap();
        assert_eq!(s.selected_index(), 4);
        s.handle_key_event(key(KeyCode::Down)).unwrap();
        assert_eq!(s.selected_index(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn copy_marks_the_voucher_until_the_timer_fires() {
        let clipboard = SharedClipboard::default();
        let written = clipboard.0.clone();
        let mut s = screen(Box::new(clipboard));
        let (tx, mut rx) = mpsc::unbounded_channel();
        s.init(tx).unwrap();

        let action = s.handle_key_event(key(KeyCode::Char('c'))).unwrap();
        assert!(matches!(action, Some(Action::Notify(ref n)) if n.title == "Copied!"));
        assert_eq!(written.lock().unwrap().as_slice(), ["HSP-AXBQ-2847"]);
        let first = EntityId::from("1");
        assert!(s.feedback.is_copied(&first));

        tokio::time::sleep(Duration::from_secs(3)).await;
        let expired = rx.recv().await.unwrap();
        assert_eq!(expired, Action::CopyFeedbackExpired { generation: 1 });
        assert_eq!(s.copied_code(), Some("HSP-AXBQ-2847"));
        s.update(&expired).unwrap();
        assert!(!s.feedback.is_copied(&first));
        assert_eq!(s.copied_code(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn superseding_copy_cancels_the_older_timer() {
        let mut s = screen(Box::new(SharedClipboard::default()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        s.init(tx).unwrap();

        s.handle_key_event(key(KeyCode::Char('c'))).unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        s.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        s.handle_key_event(key(KeyCode::Char('c'))).unwrap();

        // Only the second timer may fire.
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(
            rx.recv().await.unwrap(),
            Action::CopyFeedbackExpired { generation: 2 }
        );
        assert!(rx.try_recv().is_err());

        // A stale expiry would leave the newer marker alone.
        s.update(&Action::CopyFeedbackExpired { generation: 1 }).unwrap();
        assert!(s.feedback.is_copied(&EntityId::from("2")));
    }

    #[test]
    fn generate_reports_unsupported() {
        let mut s = screen(Box::new(SharedClipboard::default()));
        match s.handle_key_event(key(KeyCode::Char('n'))).unwrap() {
            Some(Action::Notify(n)) => {
                assert_eq!(n.title, "Generate Vouchers");
                assert_eq!(n.level, NotificationLevel::Warning);
                assert_eq!(
                    n.detail.as_deref(),
                    Some("Voucher generation is not available in this build")
                );
            }
            other => panic!("expected a notification, got {other:?}"),
        }
        assert_eq!(s.book.all().len(), 5);
    }

    #[test]
    fn clipboard_failure_notifies_and_sets_no_marker() {
        let mut s = screen(Box::new(BrokenClipboard));
        let action = s.handle_key_event(key(KeyCode::Enter)).unwrap();
        match action {
            Some(Action::Notify(n)) => {
                assert_eq!(n.title, "Copy failed");
                assert_eq!(n.level, NotificationLevel::Error);
            }
            other => panic!("expected a notification, got {other:?}"),
        }
        assert!(s.feedback.copied_id().is_none());
    }
}
