//! Router Control screen: router selector, Overview / DHCP / System views,
//! and the reboot confirmation flow.

use std::cell::Cell;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell as TableCell, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use hotspot_core::{DhcpLease, EntityId, RebootFlow, RebootState, Router, RouterDetails, RouterPanel, ScheduledTask};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::{dialog, form, header, meter, sub_tabs};

const TAB_LABELS: [&str; 3] = ["Overview", "DHCP", "System"];

const SELECTOR_LABEL: &str = " Router: ";
const SELECTOR_GAP: &str = "  ";
const SELECTOR_DOT: &str = "\u{25cf} ";

const REBOOT_WARNING: &str = "This will temporarily disconnect all users. \
     The router will be back online in approximately 60 seconds.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RouterTab {
    #[default]
    Overview,
    Dhcp,
    System,
}

impl RouterTab {
    fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::Dhcp => 1,
            Self::System => 2,
        }
    }

    fn from_index(i: usize) -> Self {
        match i {
            1 => Self::Dhcp,
            2 => Self::System,
            _ => Self::Overview,
        }
    }

    fn next(self) -> Self {
        Self::from_index((self.index() + 1) % TAB_LABELS.len())
    }

    fn prev(self) -> Self {
        Self::from_index((self.index() + TAB_LABELS.len() - 1) % TAB_LABELS.len())
    }
}

pub struct RouterScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    panel: RouterPanel,
    flow: RebootFlow,
    tab: RouterTab,
    lease_state: TableState,
    reboot_timer: Option<ScheduledTask>,
    reboot_delay: Duration,
    throbber_state: throbber_widgets_tui::ThrobberState,
    /// Sub-tab row from the last render, for mouse hit-testing.
    tabs_area: Cell<Rect>,
    /// Router selector row from the last render.
    selector_area: Cell<Rect>,
}

impl RouterScreen {
    pub fn new(
        routers: Vec<Router>,
        details: RouterDetails,
        leases: Vec<DhcpLease>,
        reboot_delay: Duration,
    ) -> Self {
        Self {
            focused: false,
            action_tx: None,
            panel: RouterPanel::new(routers, details, leases),
            flow: RebootFlow::new(),
            tab: RouterTab::default(),
            lease_state: TableState::default().with_selected(Some(0)),
            reboot_timer: None,
            reboot_delay,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            tabs_area: Cell::new(Rect::default()),
            selector_area: Cell::new(Rect::default()),
        }
    }

    fn router_name(&self) -> String {
        self.panel
            .current()
            .map_or_else(|| "router".into(), |r| r.name.clone())
    }

    fn confirm_reboot(&mut self) -> Option<Action> {
        let generation = self.flow.confirm()?;
        info!(router = %self.router_name(), generation, "reboot requested");
        if let Some(tx) = &self.action_tx {
            self.reboot_timer = Some(ScheduledTask::after(
                self.reboot_delay,
                tx.clone(),
                Action::RebootComplete { generation },
            ));
        }
        Some(Action::Notify(
            Notification::warning("Rebooting Router")
                .with_detail("The router will be back online in approximately 60 seconds."),
        ))
    }

    /// Router whose selector entry covers `column`, counted from the
    /// start of the selector row.
    fn router_at(&self, column: u16) -> Option<EntityId> {
        let column = usize::from(column);
        let mut x = Span::raw(SELECTOR_LABEL).width();
        for (i, router) in self.panel.routers().iter().enumerate() {
            if i > 0 {
                x += Span::raw(SELECTOR_GAP).width();
            }
            let end = x + Span::raw(SELECTOR_DOT).width() + Span::raw(router.name.as_str()).width();
            if (x..end).contains(&column) {
                return Some(router.id.clone());
            }
            x = end;
        }
        None
    }

    fn move_lease(&mut self, delta: isize) {
        let len = self.panel.leases().len();
        if len == 0 {
            return;
        }
        let next = self
            .lease_state
            .selected()
            .unwrap_or(0)
            .saturating_add_signed(delta)
            .min(len - 1);
        self.lease_state.select(Some(next));
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_selector(&self, frame: &mut Frame, area: Rect) {
        let selected = self.panel.selected_index();
        let mut spans = vec![Span::styled(SELECTOR_LABEL, theme::key_hint())];
        for (i, router) in self.panel.routers().iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SELECTOR_GAP, theme::key_hint()));
            }
            spans.push(Span::styled(
                SELECTOR_DOT,
                Style::default().fg(theme::router_status(router.status)),
            ));
            let style = if i == selected {
                theme::tab_active().add_modifier(Modifier::BOLD)
            } else {
                theme::tab_inactive()
            };
            spans.push(Span::styled(router.name.clone(), style));
        }
        let mut lines = vec![Line::from(spans)];
        if let Some(router) = self.panel.current() {
            lines.push(Line::from(vec![
                Span::styled(format!("         {}", router.ip), Style::default().fg(theme::CORAL)),
                Span::styled(format!("  {}", router.model), theme::key_hint()),
                Span::styled(
                    format!("  {}", router.status),
                    Style::default().fg(theme::router_status(router.status)),
                ),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect) {
        let details = self.panel.details();
        let layout = Layout::vertical([
            Constraint::Length(7), // status gauges
            Constraint::Min(3),    // quick actions
        ])
        .split(area);

        let block = Block::default()
            .title(Span::styled(" Status ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(layout[0]);
        frame.render_widget(block, layout[0]);

        let bar_width = inner.width.saturating_sub(30).clamp(6, 40);
        let lines = vec![
            Line::from(vec![
                Span::styled(" Uptime ", theme::key_hint()),
                Span::styled(details.uptime.clone(), Style::default().fg(theme::NEON_CYAN)),
                Span::styled("   Firmware ", theme::key_hint()),
                Span::styled(details.firmware.clone(), Style::default().fg(theme::NEON_CYAN)),
            ]),
            meter::meter_line(
                "CPU Usage",
                &format!("{}%", details.cpu_percent),
                meter::percent(details.cpu_percent),
                bar_width,
                theme::usage(details.cpu_percent),
            ),
            meter::meter_line(
                "Memory",
                &details.memory,
                meter::percent(details.memory_percent),
                bar_width,
                theme::usage(details.memory_percent),
            ),
            meter::meter_line(
                "Temperature",
                &format!("{}\u{b0}C", details.temperature_c),
                meter::percent(details.temperature_c),
                bar_width,
                theme::usage(details.temperature_c),
            ),
            meter::meter_line(
                "Bandwidth",
                &details.bandwidth,
                meter::percent(details.bandwidth_percent),
                bar_width,
                theme::usage(details.bandwidth_percent),
            ),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        self.render_reboot_trigger(frame, layout[1], " Quick Actions ");
    }

    fn render_reboot_trigger(&self, frame: &mut Frame, area: Rect, title: &str) {
        let block = Block::default()
            .title(Span::styled(title.to_owned(), theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.flow.trigger_enabled() {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(" r ", theme::key_hint_key()),
                    Span::styled(
                        "\u{23fb} Reboot Router",
                        Style::default().fg(theme::ERROR_RED).add_modifier(Modifier::BOLD),
                    ),
                ])),
                inner,
            );
        } else {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Rebooting...")
                .style(Style::default().fg(theme::BORDER_GRAY))
                .throbber_style(Style::default().fg(theme::ELECTRIC_YELLOW));
            frame.render_stateful_widget(throbber, inner, &mut self.throbber_state.clone());
        }
    }

    fn render_dhcp(&self, frame: &mut Frame, area: Rect) {
        let details = self.panel.details();
        let layout = Layout::vertical([
            Constraint::Length(6), // server config
            Constraint::Min(3),    // leases
        ])
        .split(area);

        let block = Block::default()
            .title(Span::styled(" DHCP Server ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(layout[0]);
        frame.render_widget(block, layout[0]);

        let dns = details
            .dns_servers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let lines = vec![
            form::toggle_line(
                "Enable DHCP Server",
                Some("d to toggle"),
                self.panel.dhcp_enabled(),
                false,
            ),
            Line::from(vec![
                Span::styled("  Pool       ", theme::key_hint()),
                Span::styled(
                    format!("{} - {}", details.dhcp_pool_start, details.dhcp_pool_end),
                    Style::default().fg(theme::CORAL),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Lease Time ", theme::key_hint()),
                Span::styled(details.lease_time.clone(), Style::default().fg(theme::NEON_CYAN)),
            ]),
            Line::from(vec![
                Span::styled("  DNS        ", theme::key_hint()),
                Span::styled(dns, Style::default().fg(theme::CORAL)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        let leases = self.panel.leases();
        let block = Block::default()
            .title(format!(" Active DHCP Leases ({}) ", leases.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));

        let header_row = Row::new(
            ["Hostname", "MAC Address", "IP Address", "Expires"]
                .into_iter()
                .map(|h| TableCell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = leases
            .iter()
            .map(|lease| {
                Row::new(vec![
                    TableCell::from(lease.hostname.clone())
                        .style(Style::default().fg(theme::NEON_CYAN)),
                    TableCell::from(lease.mac.clone()).style(theme::key_hint()),
                    TableCell::from(lease.ip.to_string()).style(Style::default().fg(theme::CORAL)),
                    TableCell::from(lease.expires.clone()),
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Fill(2),
            Constraint::Length(19),
            Constraint::Length(15),
            Constraint::Length(10),
        ];
        let table = Table::new(rows, widths)
            .header(header_row)
            .block(block)
            .row_highlight_style(theme::table_selected());
        let mut state = self.lease_state;
        frame.render_stateful_widget(table, layout[1], &mut state);
    }

    fn render_system(&self, frame: &mut Frame, area: Rect) {
        let details = self.panel.details();
        let info_height = u16::try_from(details.system_info.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let layout = Layout::vertical([
            Constraint::Length(info_height),
            Constraint::Min(3),
        ])
        .split(area);

        let block = Block::default()
            .title(Span::styled(" System Information ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(layout[0]);
        frame.render_widget(block, layout[0]);

        let lines: Vec<Line> = details
            .system_info
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled(format!("  {:<20}", item.label), theme::key_hint()),
                    Span::styled(item.value.clone(), Style::default().fg(theme::NEON_CYAN)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        self.render_reboot_trigger(frame, layout[1], " Maintenance ");
    }
}

impl Component for RouterScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.flow.is_confirming() {
            return match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Ok(self.confirm_reboot()),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                    self.flow.cancel();
                    Ok(None)
                }
                _ => Ok(None),
            };
        }

        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.panel.cycle(-1),
            KeyCode::Char('l') | KeyCode::Right => self.panel.cycle(1),
            KeyCode::Char(']' | 't') => self.tab = self.tab.next(),
            KeyCode::Char('[') => self.tab = self.tab.prev(),
            KeyCode::Char('j') | KeyCode::Down if self.tab == RouterTab::Dhcp => self.move_lease(1),
            KeyCode::Char('k') | KeyCode::Up if self.tab == RouterTab::Dhcp => self.move_lease(-1),
            KeyCode::Char('d') => {
                let enabled = self.panel.toggle_dhcp();
                debug!(enabled, "dhcp server toggled");
            }
            KeyCode::Char('r') => {
                self.flow.request();
            }
            _ => {}
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.flow.is_confirming() {
            return Ok(None);
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let pos = Position::new(mouse.column, mouse.row);
            let area = self.tabs_area.get();
            if area.contains(pos) {
                if let Some(i) = sub_tabs::tab_at(&TAB_LABELS, self.tab.index(), mouse.column - area.x) {
                    self.tab = RouterTab::from_index(i);
                }
            }
            let selector = self.selector_area.get();
            if selector.contains(pos) {
                if let Some(id) = self.router_at(mouse.column - selector.x) {
                    self.panel.select(&id)?;
                }
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if !self.flow.trigger_enabled() {
                    self.throbber_state.calc_next();
                }
            }
            Action::RebootComplete { generation } => {
                if self.flow.complete(*generation) {
                    self.reboot_timer = None;
                    info!(router = %self.router_name(), "reboot finished");
                    return Ok(Some(Action::Notify(
                        Notification::success("Router Online")
                            .with_detail("Router has been successfully rebooted."),
                    )));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(header::HEIGHT),
            Constraint::Length(2), // selector
            Constraint::Length(1), // sub-tabs
            Constraint::Min(4),    // body
            Constraint::Length(1), // hints
        ])
        .split(area);

        header::render_header(
            frame,
            layout[0],
            "Router Control",
            "Manage router settings, DHCP, and system controls",
        );
        self.selector_area
            .set(Rect::new(layout[1].x, layout[1].y, layout[1].width, 1));
        self.render_selector(frame, layout[1]);

        let tabs_area = Rect::new(layout[2].x + 1, layout[2].y, layout[2].width.saturating_sub(1), 1);
        self.tabs_area.set(tabs_area);
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&TAB_LABELS, self.tab.index())),
            tabs_area,
        );

        match self.tab {
            RouterTab::Overview => self.render_overview(frame, layout[3]),
            RouterTab::Dhcp => self.render_dhcp(frame, layout[3]),
            RouterTab::System => self.render_system(frame, layout[3]),
        }

        let hints = Line::from(vec![
            Span::styled("  h/l ", theme::key_hint_key()),
            Span::styled("router  ", theme::key_hint()),
            Span::styled("[/] ", theme::key_hint_key()),
            Span::styled("view  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("toggle DHCP  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reboot", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[4]);

        if self.flow.state() == RebootState::Confirming {
            dialog::render_confirm(frame, area, "Reboot Router?", REBOOT_WARNING);
        }
    }

    fn captures_input(&self) -> bool {
        self.flow.is_confirming()
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Router"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use hotspot_core::Seed;
    use tokio::sync::mpsc;

    fn screen() -> RouterScreen {
        let seed = Seed::builtin();
        RouterScreen::new(
            seed.routers,
            seed.router_details,
            seed.leases,
            Duration::from_secs(3),
        )
    }

    fn press(s: &mut RouterScreen, code: KeyCode) -> Option<Action> {
        s.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn request_then_cancel_leaves_router_untouched() {
        let mut s = screen();
        let before = (s.panel.routers().to_vec(), s.panel.details().clone());

        press(&mut s, KeyCode::Char('r'));
        assert!(s.captures_input());
        // Keys outside the dialog vocabulary are swallowed.
        assert_eq!(press(&mut s, KeyCode::Char('l')), None);
        assert_eq!(s.panel.selected_index(), 0);

        press(&mut s, KeyCode::Esc);
        assert!(!s.captures_input());
        assert_eq!(s.flow.state(), RebootState::Idle);
        assert_eq!((s.panel.routers().to_vec(), s.panel.details().clone()), before);
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_runs_to_completion_and_reenables_trigger() {
        let mut s = screen();
        let (tx, mut rx) = mpsc::unbounded_channel();
        s.init(tx).unwrap();
        let before = s.panel.details().clone();

        press(&mut s, KeyCode::Char('r'));
        let notify = press(&mut s, KeyCode::Char('y'));
        assert!(matches!(notify, Some(Action::Notify(ref n)) if n.title == "Rebooting Router"));
        assert!(!s.flow.trigger_enabled());

        // A second request while rebooting is ignored.
        press(&mut s, KeyCode::Char('r'));
        assert!(!s.captures_input());

        tokio::time::sleep(Duration::from_secs(4)).await;
        let done = rx.recv().await.unwrap();
        assert_eq!(done, Action::RebootComplete { generation: 1 });

        let notify = s.update(&done).unwrap();
        assert!(matches!(notify, Some(Action::Notify(ref n)) if n.title == "Router Online"));
        assert!(s.flow.trigger_enabled());
        assert_eq!(s.panel.details(), &before);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut s = screen();
        press(&mut s, KeyCode::Char('r'));
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.update(&Action::RebootComplete { generation: 7 }).unwrap(), None);
        assert!(!s.flow.trigger_enabled());
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn clicking_a_router_name_selects_it() {
        let mut s = screen();
        s.selector_area.set(Rect::new(10, 4, 100, 1));

        // " Router: " then "● Main Router", "  ", "● Branch A Router"
        s.handle_mouse_event(click(10 + 30, 4)).unwrap();
        assert_eq!(s.panel.current().unwrap().id, EntityId::from("branch-a"));
        s.handle_mouse_event(click(10 + 9, 4)).unwrap();
        assert_eq!(s.panel.selected_index(), 0);

        // The label and the gaps select nothing
        s.handle_mouse_event(click(10 + 2, 4)).unwrap();
        s.handle_mouse_event(click(10 + 22, 4)).unwrap();
        assert_eq!(s.panel.selected_index(), 0);

        // The confirm dialog blocks selection
        press(&mut s, KeyCode::Char('r'));
        s.handle_mouse_event(click(10 + 45, 4)).unwrap();
        assert_eq!(s.panel.selected_index(), 0);
    }

    #[test]
    fn router_and_tab_cycling() {
        let mut s = screen();
        press(&mut s, KeyCode::Char('h'));
        assert_eq!(s.panel.selected_index(), 2);
        press(&mut s, KeyCode::Char('l'));
        assert_eq!(s.panel.selected_index(), 0);

        press(&mut s, KeyCode::Char('t'));
        assert_eq!(s.tab, RouterTab::Dhcp);
        press(&mut s, KeyCode::Char('j'));
        assert_eq!(s.lease_state.selected(), Some(1));
        press(&mut s, KeyCode::Char('['));
        press(&mut s, KeyCode::Char('['));
        assert_eq!(s.tab, RouterTab::System);

        assert!(s.panel.dhcp_enabled());
        press(&mut s, KeyCode::Char('d'));
        assert!(!s.panel.dhcp_enabled());
    }
}
