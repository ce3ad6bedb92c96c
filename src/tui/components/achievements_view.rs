//! # Achievements Page
//!
//! Badge list with an unlocked/locked filter (`1` Todos, `2` Desbloqueados,
//! `3` Bloqueados). Enter opens a detail overlay for the highlighted badge.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::core::achievements::{AchievementBoard, Badge, BadgeFilter, Progress, Rarity, long_date};
use crate::core::action::Action;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

const BAR_WIDTH: usize = 20;

fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::Gray,
        Rarity::Rare => Color::Blue,
        Rarity::Epic => Color::Magenta,
        Rarity::Legendary => Color::Yellow,
    }
}

/// `████████░░ 8/10`
pub fn progress_bar(progress: Progress) -> String {
    let filled = (progress.ratio() * BAR_WIDTH as f64).round() as usize;
    format!(
        "{}{} {}/{}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        progress.current,
        progress.total
    )
}

/// `cursor` is the highlighted row within the filtered list.
pub fn action_for(board: &AchievementBoard, cursor: &mut usize, event: &TuiEvent) -> Option<Action> {
    if board.opened().is_some() {
        return match event {
            TuiEvent::Escape | TuiEvent::Submit => Some(Action::OpenBadge(None)),
            _ => None,
        };
    }
    let count = board.filtered().count();
    match event {
        TuiEvent::InputChar(c @ '1'..='3') => {
            let index = (*c as usize) - ('1' as usize);
            *cursor = 0;
            Some(Action::SetBadgeFilter(BadgeFilter::ALL[index]))
        }
        TuiEvent::CursorUp => {
            *cursor = cursor.saturating_sub(1);
            None
        }
        TuiEvent::CursorDown => {
            *cursor = (*cursor + 1).min(count.saturating_sub(1));
            None
        }
        TuiEvent::Submit => board
            .filtered()
            .nth(*cursor)
            .map(|b| Action::OpenBadge(Some(b.id.clone()))),
        _ => None,
    }
}

pub struct AchievementsView<'a> {
    pub board: &'a AchievementBoard,
    pub cursor: usize,
}

impl<'a> AchievementsView<'a> {
    pub fn new(board: &'a AchievementBoard, cursor: usize) -> Self {
        Self { board, cursor }
    }

    fn header(&self) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                "Badges e Conquistas",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "{} de {} conquistas desbloqueadas",
                    self.board.unlocked_count(),
                    self.board.badges().len()
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }

    fn tabs(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, filter) in BadgeFilter::ALL.iter().enumerate() {
            let style = if *filter == self.board.filter {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, filter.label()), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn badge_line(&self, badge: &Badge, highlighted: bool) -> Line<'static> {
        let mut name_style = Style::default().add_modifier(Modifier::BOLD);
        if !badge.is_unlocked() {
            name_style = name_style.fg(Color::DarkGray);
        }
        if highlighted {
            name_style = name_style.add_modifier(Modifier::REVERSED);
        }
        let status = match (badge.unlocked_on, badge.progress) {
            (Some(_), _) => Span::styled("  ✓ desbloqueado", Style::default().fg(Color::Green)),
            (None, Some(progress)) => Span::styled(
                format!("  Faltam {} para desbloquear", progress.remaining()),
                Style::default().fg(Color::DarkGray),
            ),
            (None, None) => Span::styled("  🔒 bloqueado", Style::default().fg(Color::DarkGray)),
        };
        Line::from(vec![
            Span::raw(format!("{} ", badge.icon)),
            Span::styled(badge.name.clone(), name_style),
            Span::styled(
                format!(" [{}]", badge.rarity.label()),
                Style::default().fg(rarity_color(badge.rarity)),
            ),
            status,
        ])
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, badge: &Badge) {
        let overlay = centered_rect(60, 50, area);
        frame.render_widget(Clear, overlay);

        let mut lines = vec![
            Line::from(vec![
                Span::raw(format!("{} ", badge.icon)),
                Span::styled(badge.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(Span::styled(
                badge.rarity.label(),
                Style::default().fg(rarity_color(badge.rarity)),
            )),
            Line::default(),
            Line::from(badge.description.clone()),
            Line::default(),
        ];
        match (badge.unlocked_on, badge.progress) {
            (Some(date), _) => lines.push(Line::from(Span::styled(
                format!("Desbloqueado em: {}", long_date(date)),
                Style::default().fg(Color::Green),
            ))),
            (None, Some(progress)) => {
                lines.push(Line::from(Span::styled(
                    progress_bar(progress),
                    Style::default().fg(Color::Cyan),
                )));
                lines.push(Line::from(format!(
                    "{} de {} completos",
                    progress.current, progress.total
                )));
            }
            (None, None) => lines.push(Line::from(Span::styled(
                "Continue usando a plataforma para desbloquear",
                Style::default().fg(Color::DarkGray),
            ))),
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(rarity_color(badge.rarity)))
            .title(" Conquista ")
            .title_bottom(Line::from(" Esc fechar ").centered())
            .padding(Padding::uniform(1));
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            overlay,
        );
    }
}

impl Component for AchievementsView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, tabs_area, list_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(self.header()), header_area);
        frame.render_widget(Paragraph::new(self.tabs()), tabs_area);

        let lines: Vec<Line> = self
            .board
            .filtered()
            .enumerate()
            .map(|(i, b)| self.badge_line(b, i == self.cursor))
            .collect();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(lines).block(block), list_area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "↑↓ navegar · Enter detalhes · 1-3 filtrar",
                Style::default().fg(Color::DarkGray),
            )),
            footer_area,
        );

        if let Some(badge) = self.board.opened() {
            self.render_detail(frame, area, badge);
        }
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
