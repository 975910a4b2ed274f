//! Left-hand navigation column: brand, the eight panel rows, and the
//! collapse toggle.

use std::cell::Cell;

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use hotspot_core::{PanelId, Sidebar};

use crate::theme;

/// Rows above the first panel entry (brand line + spacer).
const PANEL_ROW_OFFSET: u16 = 2;

/// What a mouse click on the sidebar landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarHit {
    Panel(PanelId),
    Toggle,
}

pub struct SidebarView {
    state: Sidebar,
    /// Area from the last render, for mouse hit-testing.
    last_area: Cell<Rect>,
}

impl SidebarView {
    pub fn new(collapsed: bool) -> Self {
        Self {
            state: Sidebar::new(collapsed),
            last_area: Cell::new(Rect::default()),
        }
    }

    pub fn width(&self) -> u16 {
        self.state.width()
    }

    pub fn collapsed(&self) -> bool {
        self.state.collapsed()
    }

    pub fn toggle(&mut self) {
        self.state.toggle();
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.last_area.get().contains(Position::new(column, row))
    }

    /// Resolve a click to a panel row or the toggle row.
    pub fn hit(&self, column: u16, row: u16) -> Option<SidebarHit> {
        if !self.contains(column, row) {
            return None;
        }
        let inner = Self::block().inner(self.last_area.get());
        if inner.height == 0 || !inner.contains(Position::new(column, row)) {
            return None;
        }
        if row == inner.bottom().saturating_sub(1) {
            return Some(SidebarHit::Toggle);
        }
        let offset = row.checked_sub(inner.y + PANEL_ROW_OFFSET)?;
        PanelId::ALL
            .get(usize::from(offset))
            .map(|&panel| SidebarHit::Panel(panel))
    }

    fn block() -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, active: PanelId) {
        self.last_area.set(area);

        let block = Self::block();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let collapsed = self.collapsed();
        let brand = if collapsed { "HS" } else { "\u{25c6} HotSpot Pro" };
        let mut lines = vec![
            Line::from(Span::styled(
                brand,
                Style::default()
                    .fg(theme::ELECTRIC_PURPLE)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for panel in PanelId::ALL {
            let is_active = panel == active;
            let style = if is_active {
                theme::tab_active().add_modifier(Modifier::BOLD)
            } else {
                theme::tab_inactive()
            };
            let marker = if is_active { "\u{258e}" } else { " " };
            let text = if collapsed {
                format!("{marker}{}", panel.number())
            } else {
                format!("{marker}{} {}", panel.number(), panel.label())
            };
            lines.push(Line::from(Span::styled(text, style)));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        let toggle = if collapsed {
            " \u{00bb}"
        } else {
            " \u{00ab} Collapse"
        };
        let toggle_area = Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(toggle, theme::key_hint())),
            toggle_area,
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(view: &SidebarView, height: u16) {
        let mut terminal = Terminal::new(TestBackend::new(80, height)).unwrap();
        terminal
            .draw(|frame| {
                view.render(
                    frame,
                    Rect::new(0, 0, view.width(), height),
                    PanelId::Dashboard,
                );
            })
            .unwrap();
    }

    #[test]
    fn hit_resolves_panel_rows_and_toggle() {
        let view = SidebarView::new(false);
        rendered(&view, 24);

        // Border at row 0, brand at 1, spacer at 2, panels from 3.
        assert_eq!(view.hit(5, 3), Some(SidebarHit::Panel(PanelId::Dashboard)));
        assert_eq!(view.hit(5, 6), Some(SidebarHit::Panel(PanelId::Router)));
        assert_eq!(view.hit(5, 10), Some(SidebarHit::Panel(PanelId::Settings)));
        assert_eq!(view.hit(5, 22), Some(SidebarHit::Toggle));
        assert_eq!(view.hit(5, 2), None);
        assert_eq!(view.hit(5, 15), None);
        assert_eq!(view.hit(40, 3), None);
    }

    #[test]
    fn toggle_only_changes_width() {
        let mut view = SidebarView::new(false);
        assert_eq!(view.width(), 24);
        view.toggle();
        assert!(view.collapsed());
        assert_eq!(view.width(), 6);

        rendered(&view, 24);
        assert_eq!(view.hit(2, 4), Some(SidebarHit::Panel(PanelId::Vouchers)));
        assert_eq!(view.hit(10, 4), None);
    }
}
