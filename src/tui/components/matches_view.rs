//! # Matches Page
//!
//! Status tabs (`1` Novos, `2` Em andamento, `3` Concluídos), the filtered
//! match list with an expandable detail for the selected match, and the
//! suggested profiles underneath.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::matches::{CompatibilityBand, Match, MatchBoard, MatchStatus, match_count_label};
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

fn band_color(percentage: u8) -> Color {
    match CompatibilityBand::from_percentage(percentage) {
        CompatibilityBand::High => Color::Green,
        CompatibilityBand::Medium => Color::Yellow,
        CompatibilityBand::Low => Color::Red,
    }
}

/// Map a key press on the matches page to a core action.
/// `cursor` is the highlighted row within the filtered list.
pub fn action_for(board: &MatchBoard, cursor: &mut usize, event: &TuiEvent) -> Option<Action> {
    let count = board.filtered().count();
    match event {
        TuiEvent::InputChar(c @ '1'..='3') => {
            let index = (*c as usize) - ('1' as usize);
            *cursor = 0;
            Some(Action::SetMatchFilter(MatchStatus::ALL[index]))
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
            .map(|m| Action::ToggleMatch(m.id.clone())),
        _ => None,
    }
}

pub struct MatchesView<'a> {
    pub board: &'a MatchBoard,
    pub cursor: usize,
}

impl<'a> MatchesView<'a> {
    pub fn new(board: &'a MatchBoard, cursor: usize) -> Self {
        Self { board, cursor }
    }

    fn tabs(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, status) in MatchStatus::ALL.iter().enumerate() {
            let style = if *status == self.board.active_filter {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, status.label()), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn match_lines(&self, m: &Match, highlighted: bool) -> Vec<Line<'static>> {
        let expanded = self.board.selected() == Some(m.id.as_str());
        let name_style = if highlighted {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let marker = if expanded { "▾ " } else { "▸ " };
        let mut lines = vec![
            Line::from(vec![
                Span::raw(marker),
                Span::styled(m.partner_name.clone(), name_style),
                Span::raw("  "),
                Span::styled(
                    format!("{}% compatível", m.compatibility),
                    Style::default().fg(band_color(m.compatibility)),
                ),
            ]),
            Line::from(format!(
                "   Você ensina: {}  ·  Aprende: {}",
                m.your_skills.join(", "),
                m.partner_skills.join(", ")
            )),
        ];
        if let Some(last) = &m.last_interaction {
            lines.push(Line::from(Span::styled(
                format!("   Última interação: {last}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
        if expanded {
            if let Some(bio) = &m.bio {
                lines.push(Line::from(format!("   {bio}")));
            }
            if !m.shared_interests.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("   Interesses em comum: {}", m.shared_interests.join(", ")),
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        lines.push(Line::default());
        lines
    }

    fn suggestion_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            "Sugestões para você",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        for s in &self.board.suggestions {
            let mutual = s
                .mutual_connections
                .map(|n| format!(" · {n} conexões em comum"))
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::raw(format!("• {}  ", s.partner_name)),
                Span::styled(
                    format!("{}% potencial", s.potential_compatibility),
                    Style::default().fg(band_color(s.potential_compatibility)),
                ),
                Span::styled(mutual, Style::default().fg(Color::DarkGray)),
            ]));
            lines.push(Line::from(format!(
                "  Você pode aprender: {} · Pode ensinar: {}",
                s.your_missing_skills.join(", "),
                s.partner_missing_skills.join(", ")
            )));
        }
        lines
    }
}

impl Component for MatchesView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let suggestions_height = 1 + 2 * self.board.suggestions.len() as u16;
        let [tabs_area, list_area, suggestions_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(suggestions_height + 1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(self.tabs()), tabs_area);

        let filtered: Vec<&Match> = self.board.filtered().collect();
        let list: Vec<Line> = if filtered.is_empty() {
            vec![Line::from(Span::styled(
                "Nenhum match nesta categoria.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            filtered
                .iter()
                .enumerate()
                .flat_map(|(i, m)| self.match_lines(m, i == self.cursor))
                .collect()
        };
        frame.render_widget(
            Paragraph::new(list).wrap(Wrap { trim: false }),
            list_area,
        );

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::ZERO);
        frame.render_widget(
            Paragraph::new(self.suggestion_lines()).block(block),
            suggestions_area,
        );

        let footer = format!(
            "{} · {} perfis disponíveis · Enter detalhes",
            match_count_label(filtered.len()),
            self.board.available_profiles()
        );
        frame.render_widget(
            Paragraph::new(Span::styled(footer, Style::default().fg(Color::DarkGray))),
            footer_area,
        );
    }
}
