//! Application core: event loop, panel management, action dispatch.

use std::cell::Cell;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use hotspot_config::Config;
use hotspot_core::{Clipboard, PanelId, Seed, ViewRouter};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::create_screens;
use crate::sidebar::{SidebarHit, SidebarView};
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// Active panel plus the one "back" returns to.
    router: ViewRouter,
    sidebar: SidebarView,
    /// All panel components, keyed by PanelId.
    screens: HashMap<PanelId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Search bar visibility.
    search_active: bool,
    /// Search query of the active panel, mirrored for the status bar.
    search_query: String,
    /// Action sender. Components dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver. The main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    notification_ttl: Duration,
    /// Toast area from the last render, for click-to-dismiss.
    toast_area: Cell<Rect>,
    tick_rate: Duration,
    render_rate: Duration,
}

impl App {
    pub fn new(cfg: &Config, seed: Seed, clipboard: Box<dyn Clipboard + Send>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<PanelId, Box<dyn Component>> =
            create_screens(seed, &cfg.timing, clipboard).into_iter().collect();

        Self {
            router: ViewRouter::new(cfg.ui.initial_panel()),
            sidebar: SidebarView::new(cfg.ui.sidebar_collapsed),
            screens,
            running: true,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            action_tx,
            action_rx,
            notification: None,
            notification_ttl: cfg.timing.notification(),
            toast_area: Cell::new(Rect::default()),
            tick_rate: cfg.ui.tick_rate(),
            render_rate: cfg.ui.render_rate(),
        }
    }

    /// Initialize all panel components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.router.active()) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let (width, height) = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        let mut events = EventReader::new(self.tick_rate, self.render_rate);

        info!(panel = %self.router.active(), width, height, "TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Paste(text) => {
                    let action = self.handle_paste(&text);
                    self.action_tx.send(action)?;
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    fn active_screen(&self) -> Option<&dyn Component> {
        let screen = self.screens.get(&self.router.active())?;
        Some(&**screen)
    }

    /// Whether the active panel is in a modal or editing state.
    fn active_captures_input(&self) -> bool {
        match self.active_screen() {
            Some(screen) => screen.captures_input(),
            None => false,
        }
    }

    /// The active panel's search query, or `None` if it has no search.
    fn active_search_query(&self) -> Option<&str> {
        self.active_screen()?.search_query()
    }

    /// Mirror the active panel's query after switching panels. An open
    /// search bar belongs to the panel being left, so it closes.
    fn sync_search(&mut self) {
        self.search_active = false;
        self.search_query = self.active_search_query().unwrap_or_default().to_owned();
    }

    /// Map a key event to an action. Global keys are handled here;
    /// panel-specific keys are delegated to the active panel.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // Confirm dialogs and text editors own the keyboard
        if self.active_captures_input() {
            if let Some(screen) = self.screens.get_mut(&self.router.active()) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        if self.search_active {
            return match key.code {
                KeyCode::Esc => {
                    self.search_query.clear();
                    Ok(Some(Action::CloseSearch))
                }
                KeyCode::Enter => Ok(Some(Action::SearchSubmit)),
                KeyCode::Backspace => {
                    self.search_query.pop();
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                _ => Ok(None),
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('/')) if self.active_search_query().is_some() => {
                return Ok(Some(Action::OpenSearch));
            }
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => {
                return Ok(Some(Action::ToggleSidebar));
            }

            // Panel navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='8')) => {
                let panel = c
                    .to_digit(10)
                    .and_then(|d| u8::try_from(d).ok())
                    .and_then(PanelId::from_number);
                if let Some(panel) = panel {
                    return Ok(Some(Action::SwitchPanel(panel)));
                }
            }

            // Tab / Shift+Tab for panel cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchPanel(self.router.active().next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchPanel(self.router.active().prev())));
            }

            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.router.active()) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    /// Clicking the toast dismisses it, sidebar clicks navigate, and
    /// everything else goes to the active panel.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.notification.is_some()
            && matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
            && self
                .toast_area
                .get()
                .contains(Position::new(mouse.column, mouse.row))
        {
            return Ok(Some(Action::DismissNotification));
        }
        if !self.active_captures_input() && self.sidebar.contains(mouse.column, mouse.row) {
            if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                return Ok(match self.sidebar.hit(mouse.column, mouse.row) {
                    Some(SidebarHit::Panel(panel)) => Some(Action::SwitchPanel(panel)),
                    Some(SidebarHit::Toggle) => Some(Action::ToggleSidebar),
                    None => None,
                });
            }
            return Ok(None);
        }
        if let Some(screen) = self.screens.get_mut(&self.router.active()) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    /// Bracketed paste feeds the search bar when it is open, otherwise the
    /// active panel.
    fn handle_paste(&mut self, text: &str) -> Action {
        if self.search_active {
            self.search_query
                .extend(text.chars().filter(|c| !c.is_control()));
            Action::SearchInput(self.search_query.clone())
        } else {
            Action::Paste(text.to_owned())
        }
    }

    fn refocus(&mut self, from: PanelId) {
        if let Some(screen) = self.screens.get_mut(&from) {
            screen.set_focused(false);
        }
        if let Some(screen) = self.screens.get_mut(&self.router.active()) {
            screen.set_focused(true);
        }
    }

    fn forward_to_active(&mut self, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&self.router.active()) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Process a single action: update app state and propagate to panels.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                debug!(width = w, height = h, "terminal resized");
            }

            Action::SwitchPanel(target) => {
                let from = self.router.active();
                if self.router.select(*target) {
                    debug!("switching panel: {from} → {target}");
                    self.refocus(from);
                    self.sync_search();
                }
            }

            Action::GoBack => {
                let from = self.router.active();
                if self.router.back() {
                    debug!("back: {from} → {}", self.router.active());
                    self.refocus(from);
                    self.sync_search();
                }
            }

            Action::ToggleSidebar => {
                self.sidebar.toggle();
                debug!(collapsed = self.sidebar.collapsed(), "sidebar toggled");
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::OpenSearch => {
                if let Some(query) = self.active_search_query().map(str::to_owned) {
                    self.search_query = query;
                    self.search_active = true;
                }
            }

            Action::CloseSearch => {
                self.search_active = false;
                self.search_query.clear();
                self.action_tx.send(Action::SearchInput(String::new()))?;
            }

            Action::SearchSubmit => {
                self.search_active = false;
                self.forward_to_active(action)?;
            }

            Action::Notify(notification) => {
                debug!(title = %notification.title, level = ?notification.level, "notification");
                self.notification = Some((notification.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }

            Action::Render => {}

            Action::Tick => {
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() >= self.notification_ttl {
                        self.notification = None;
                    }
                }
                self.forward_to_active(action)?;
            }

            // Timers reach every panel: the one that armed them may be
            // in the background by now.
            scheduled if scheduled.is_scheduled() => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(scheduled)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            _ => self.forward_to_active(action)?,
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::vertical([
            Constraint::Min(1),    // sidebar + panel
            Constraint::Length(1), // status bar
        ])
        .split(area);

        let cols = Layout::horizontal([
            Constraint::Length(self.sidebar.width()),
            Constraint::Min(0),
        ])
        .split(rows[0]);

        let active = self.router.active();
        self.sidebar.render(frame, cols[0], active);
        if let Some(screen) = self.active_screen() {
            screen.render(frame, cols[1]);
        }

        self.render_status_bar(frame, rows[1]);

        if let Some((notification, _)) = &self.notification {
            self.toast_area
                .set(Self::render_notification(frame, area, notification));
        }

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = if self.search_active {
            Line::from(vec![
                Span::styled(" / ", theme::key_hint_key()),
                Span::styled(
                    format!("{}\u{2588}", self.search_query),
                    Style::default().fg(theme::NEON_CYAN),
                ),
                Span::styled("  Esc ", theme::key_hint_key()),
                Span::styled("cancel  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("submit", theme::key_hint()),
            ])
        } else {
            let mut spans = vec![Span::styled(
                format!(" {} ", self.router.active().label()),
                Style::default()
                    .fg(theme::ELECTRIC_PURPLE)
                    .add_modifier(Modifier::BOLD),
            )];
            if !self.search_query.is_empty() {
                spans.push(Span::styled(
                    format!(" filter \"{}\" ", self.search_query),
                    Style::default().fg(theme::ELECTRIC_YELLOW),
                ));
            }
            spans.extend([
                Span::styled(" 1-8 ", theme::key_hint_key()),
                Span::styled("panels  ", theme::key_hint()),
                Span::styled("Tab ", theme::key_hint_key()),
                Span::styled("next  ", theme::key_hint()),
                Span::styled("Ctrl+B ", theme::key_hint_key()),
                Span::styled("sidebar  ", theme::key_hint()),
            ]);
            if self.active_search_query().is_some() {
                spans.extend([
                    Span::styled("/ ", theme::key_hint_key()),
                    Span::styled("search  ", theme::key_hint()),
                ]);
            }
            spans.extend([
                Span::styled("? ", theme::key_hint_key()),
                Span::styled("help  ", theme::key_hint()),
                Span::styled("q ", theme::key_hint_key()),
                Span::styled("quit", theme::key_hint()),
            ]);
            Line::from(spans)
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Bottom-right toast above the status bar. Returns the area drawn.
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) -> Rect {
        let longest = notif
            .detail
            .as_deref()
            .map_or(0, |d| d.chars().count())
            .max(notif.title.chars().count());
        let width = u16::try_from(longest + 6)
            .unwrap_or(u16::MAX)
            .clamp(24, 60)
            .min(area.width);
        let height = if notif.detail.is_some() { 4 } else { 3 };

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 1);
        let toast_area = Rect::new(area.x + x, area.y + y, width, height.min(area.height));

        let (border_color, icon) = theme::notification(notif.level);

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let mut lines = vec![Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(
                notif.title.as_str(),
                Style::default()
                    .fg(theme::DIM_WHITE)
                    .add_modifier(Modifier::BOLD),
            ),
        ])];
        if let Some(detail) = &notif.detail {
            lines.push(Line::from(Span::styled(format!("   {detail}"), theme::key_hint())));
        }
        frame.render_widget(Paragraph::new(lines), inner);
        toast_area
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 60u16.min(area.width.saturating_sub(4));
        let help_height = 20u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |title: &'static str| {
            [
                Line::from(Span::styled(
                    format!("  {title}"),
                    Style::default().fg(theme::NEON_CYAN),
                )),
                Line::from(Span::styled(
                    format!("  {}", "\u{2500}".repeat(title.len())),
                    theme::key_hint(),
                )),
            ]
        };
        let entry = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let mut lines = vec![Line::from("")];
        lines.extend(section("Navigation"));
        lines.extend([
            entry("1-8", "Jump to panel"),
            entry("Tab", "Next panel"),
            entry("Esc", "Previous panel / close"),
            entry("Ctrl+B", "Collapse sidebar"),
            entry("j/k \u{2191}/\u{2193}", "Move up/down"),
            entry("g/G", "Top / bottom"),
            Line::from(""),
        ]);
        lines.extend(section("Global"));
        lines.extend([
            entry("/", "Search vouchers"),
            entry("?", "This help"),
            entry("q", "Quit"),
            Line::from(""),
        ]);
        lines.extend(section("Editing"));
        lines.extend([
            entry("Enter", "Edit field / toggle"),
            entry("s  u", "Save / revert"),
        ]);
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hotspot_core::CoreError;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    struct NullClipboard;

    impl Clipboard for NullClipboard {
        fn write(&mut self, _text: &str) -> Result<(), CoreError> {
            Ok(())
        }
    }

    fn app_with(cfg: &Config) -> App {
        let mut app = App::new(cfg, Seed::builtin(), Box::new(NullClipboard));
        app.init_screens().unwrap();
        app
    }

    fn app() -> App {
        app_with(&Config::default())
    }

    /// Run one key through the same path as the event loop.
    fn key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        if let Some(action) = app.handle_key_event(KeyEvent::new(code, modifiers)).unwrap() {
            app.action_tx.send(action).unwrap();
        }
        drain(app);
    }

    fn press(app: &mut App, code: KeyCode) {
        key(app, code, KeyModifiers::NONE);
    }

    fn drain(app: &mut App) {
        while let Ok(action) = app.action_rx.try_recv() {
            app.process_action(&action).unwrap();
        }
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn number_keys_switch_panels_and_esc_goes_back() {
        let mut app = app();
        assert_eq!(app.router.active(), PanelId::Dashboard);

        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.router.active(), PanelId::Router);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.router.active(), PanelId::Vouchers);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.router.active(), PanelId::Router);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.router.active(), PanelId::Router);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.router.active(), PanelId::Templates);
        key(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(app.router.active(), PanelId::Router);
    }

    #[test]
    fn ctrl_b_toggles_sidebar_without_changing_panel() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        key(&mut app, KeyCode::Char('b'), KeyModifiers::CONTROL);
        assert!(app.sidebar.collapsed());
        assert_eq!(app.sidebar.width(), 6);
        assert_eq!(app.router.active(), PanelId::Locations);
        key(&mut app, KeyCode::Char('b'), KeyModifiers::CONTROL);
        assert!(!app.sidebar.collapsed());
    }

    #[test]
    fn unknown_initial_panel_falls_back_to_dashboard() {
        let mut cfg = Config::default();
        cfg.ui.initial_panel = "billing".into();
        assert_eq!(app_with(&cfg).router.active(), PanelId::Dashboard);

        cfg.ui.initial_panel = "settings".into();
        assert_eq!(app_with(&cfg).router.active(), PanelId::Settings);
    }

    #[test]
    fn every_panel_renders_its_header() {
        let subtitles = [
            (PanelId::Dashboard, "Overview of your hotspot network"),
            (PanelId::Vouchers, "Create, import and manage vouchers"),
            (PanelId::Locations, "Manage your hotspot locations"),
            (PanelId::Router, "Manage router settings, DHCP, and system controls"),
            (PanelId::Templates, "Design and customize voucher templates"),
            (PanelId::Remote, "Manage remote connections to your routers"),
            (PanelId::Config, "Import, export and back up vouchers and router configuration"),
            (PanelId::Settings, "Configure your HotSpot Pro system"),
        ];
        let mut app = app();
        for (panel, subtitle) in subtitles {
            app.process_action(&Action::SwitchPanel(panel)).unwrap();
            let text = screen_text(&app);
            assert!(text.contains(subtitle), "{panel} did not render {subtitle:?}");
        }
    }

    #[test]
    fn search_filters_vouchers_and_escape_resets() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('/'));
        assert!(app.search_active);
        for c in "branch a".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert!(screen_text(&app).contains("All Vouchers (2/5)"));

        // Keys go to the query, not to navigation
        assert_eq!(app.router.active(), PanelId::Vouchers);

        press(&mut app, KeyCode::Esc);
        assert!(!app.search_active);
        assert!(app.search_query.is_empty());
        assert!(screen_text(&app).contains("All Vouchers (5/5)"));
    }

    #[test]
    fn submit_keeps_filter_and_reopen_keeps_query() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('/'));
        for c in "main".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!(!app.search_active);
        assert_eq!(app.search_query, "main");
        assert!(screen_text(&app).contains("All Vouchers (2/5)"));

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.search_query, "main");
    }

    #[test]
    fn search_only_opens_on_searchable_panels() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('/'));
        assert!(!app.search_active);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('/'));
        assert!(app.search_active);
        press(&mut app, KeyCode::Char('x'));

        // Leaving the panel closes the bar but keeps the panel's filter
        app.process_action(&Action::SwitchPanel(PanelId::Locations)).unwrap();
        assert!(!app.search_active);
        assert!(app.search_query.is_empty());
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.search_query, "x");
    }

    #[test]
    fn query_follows_the_active_panel_across_switches() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('/'));
        for c in "main".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Esc); // back to Vouchers, filter untouched
        assert_eq!(app.router.active(), PanelId::Vouchers);
        assert_eq!(app.search_query, "main");
        assert!(screen_text(&app).contains("All Vouchers (2/5)"));

        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.search_query, "main");
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.search_query, "main");
        press(&mut app, KeyCode::Esc);
        assert!(app.search_query.is_empty());
        assert!(screen_text(&app).contains("All Vouchers (5/5)"));
    }

    #[test]
    fn editing_panel_swallows_global_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('8'));
        press(&mut app, KeyCode::Enter); // edit System Name
        assert!(app.active_captures_input());

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('1'));
        assert!(app.running);
        assert_eq!(app.router.active(), PanelId::Settings);

        press(&mut app, KeyCode::Esc);
        assert!(!app.active_captures_input());
        key(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!app.running);
    }

    #[test]
    fn paste_goes_to_search_when_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('/'));
        let action = app.handle_paste("HSP\n");
        assert_eq!(action, Action::SearchInput("HSP".into()));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.handle_paste("x"), Action::Paste("x".into()));
    }

    #[test]
    fn notifications_expire_on_tick() {
        let mut cfg = Config::default();
        cfg.timing.notification_ms = 0;
        let mut app = app_with(&cfg);
        app.process_action(&Action::Notify(Notification::info("Hello")))
            .unwrap();
        assert!(screen_text(&app).contains("Hello"));
        app.process_action(&Action::Tick).unwrap();
        assert!(app.notification.is_none());
    }

    #[test]
    fn clicking_the_toast_dismisses_it() {
        let mut app = app();
        app.process_action(&Action::Notify(
            Notification::warning("Import Vouchers").with_detail("not available"),
        ))
        .unwrap();
        screen_text(&app);
        let toast = app.toast_area.get();
        assert_eq!((toast.right(), toast.bottom()), (119, 39));

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: toast.x + 1,
            row: toast.y + 1,
            modifiers: KeyModifiers::NONE,
        };
        let action = app.handle_mouse_event(click).unwrap();
        assert_eq!(action, Some(Action::DismissNotification));
        app.process_action(&Action::DismissNotification).unwrap();
        assert!(app.notification.is_none());
    }

    #[test]
    fn sidebar_click_switches_panel() {
        let mut app = app();
        screen_text(&app); // records the sidebar area
        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        let action = app.handle_mouse_event(click(2, 6)).unwrap();
        assert_eq!(action, Some(Action::SwitchPanel(PanelId::Router)));
        assert_eq!(app.handle_mouse_event(click(2, 2)).unwrap(), None);
    }
}
