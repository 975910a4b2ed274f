//! Dashboard screen: headline stat cards, network gauges, and the recent
//! activity feed.
//!
//! Layout:
//! ┌ Active Users ┐┌ Total Vouchers ┐┌ Online Routers ┐┌ Revenue ┐
//! └──────────────┘└────────────────┘└────────────────┘└─────────┘
//! ┌─ Network Status ──────────────────┐┌─ Recent Activity ─────┐
//! │ Bandwidth Used ████████▌   847 GB ││ ● Voucher redeemed    │
//! └───────────────────────────────────┘└───────────────────────┘

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use hotspot_core::{Activity, NetworkMetric, StatCard};

use crate::component::Component;
use crate::theme;
use crate::widgets::{header, meter};

pub struct DashboardScreen {
    focused: bool,
    stats: Vec<StatCard>,
    metrics: Vec<NetworkMetric>,
    activity: Vec<Activity>,
}

impl DashboardScreen {
    pub fn new(stats: Vec<StatCard>, metrics: Vec<NetworkMetric>, activity: Vec<Activity>) -> Self {
        Self {
            focused: false,
            stats,
            metrics,
            activity,
        }
    }

    fn render_stat_card(frame: &mut Frame, area: Rect, card: &StatCard) {
        let color = theme::stat_variant(card.variant);
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", card.title),
                Style::default().fg(theme::DIM_WHITE),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from(Span::styled(
            format!(" {}", card.value),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];
        if let Some(trend) = &card.trend {
            let (arrow, trend_color) = if trend.is_positive() {
                ("\u{2191}", theme::SUCCESS_GREEN)
            } else {
                ("\u{2193}", theme::ERROR_RED)
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {arrow} "), Style::default().fg(trend_color)),
                Span::styled(trend.display(), theme::key_hint()),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_network(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Network Status ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // label column (17) + value column (~10)
        let bar_width = inner.width.saturating_sub(28).clamp(6, 40);
        let mut lines = Vec::with_capacity(self.metrics.len() * 2);
        for metric in &self.metrics {
            lines.push(meter::meter_line(
                &metric.label,
                &metric.value,
                metric.ratio(),
                bar_width,
                theme::NEON_CYAN,
            ));
            lines.push(Line::from(Span::styled(
                format!(" {:<16}of {}", "", metric.max),
                Style::default().fg(theme::BORDER_GRAY),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_activity(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Recent Activity ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = self
            .activity
            .iter()
            .take(usize::from(inner.height / 2).max(1))
            .flat_map(|item| {
                [
                    Line::from(vec![
                        Span::styled(
                            " \u{25cf} ",
                            Style::default().fg(theme::activity_status(item.status)),
                        ),
                        Span::styled(item.action.clone(), Style::default().fg(theme::DIM_WHITE)),
                    ]),
                    Line::from(Span::styled(
                        format!("   {} \u{b7} {}", item.user, item.time),
                        theme::key_hint(),
                    )),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for DashboardScreen {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(header::HEIGHT),
            Constraint::Length(4), // stat cards
            Constraint::Min(4),    // network + activity
        ])
        .split(area);

        header::render_header(frame, layout[0], "Dashboard", "Overview of your hotspot network");

        if !self.stats.is_empty() {
            let cards = Layout::horizontal(
                self.stats
                    .iter()
                    .map(|_| Constraint::Ratio(1, u32::try_from(self.stats.len()).unwrap_or(1))),
            )
            .split(layout[1]);
            for (card, card_area) in self.stats.iter().zip(cards.iter()) {
                Self::render_stat_card(frame, *card_area, card);
            }
        }

        let bottom =
            Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(layout[2]);
        self.render_network(frame, bottom[0]);
        self.render_activity(frame, bottom[1]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Dashboard"
    }
}
