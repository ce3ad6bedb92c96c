//! # History Page
//!
//! Table of past exchanges under three filters: period (`d`), skill (`s`)
//! and minimum rating (`r`).

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Cell, Paragraph, Row, Table};

use crate::core::action::Action;
use crate::core::history::{
    Exchange, ExchangeStatus, HistoryFilter, average_rating, filter_exchanges, known_skills,
};
use crate::tui::component::Component;
use crate::tui::components::reviews_view::{format_date, stars};
use crate::tui::event::TuiEvent;

/// The skill after `current` in `skills`, wrapping back to "all" (`None`).
pub fn next_skill(current: Option<&str>, skills: &[String]) -> Option<String> {
    let next = match current {
        None => 0,
        Some(skill) => skills.iter().position(|s| s == skill)? + 1,
    };
    skills.get(next).cloned()
}

/// Map a key press on the history page to a core action.
pub fn action_for(exchanges: &[Exchange], filter: &HistoryFilter, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::InputChar('d') => Some(Action::CycleHistoryDate),
        TuiEvent::InputChar('r') => Some(Action::CycleHistoryRating),
        TuiEvent::InputChar('s') => Some(Action::SetHistorySkill(next_skill(
            filter.skill.as_deref(),
            &known_skills(exchanges),
        ))),
        _ => None,
    }
}

fn status_style(status: ExchangeStatus) -> Style {
    match status {
        ExchangeStatus::Completed => Style::default().fg(Color::Green),
        ExchangeStatus::Pending => Style::default().fg(Color::Yellow),
        ExchangeStatus::Cancelled => Style::default().fg(Color::Red),
    }
}

pub struct HistoryView<'a> {
    pub exchanges: &'a [Exchange],
    pub filter: &'a HistoryFilter,
    pub today: NaiveDate,
}

impl<'a> HistoryView<'a> {
    pub fn new(exchanges: &'a [Exchange], filter: &'a HistoryFilter, today: NaiveDate) -> Self {
        Self {
            exchanges,
            filter,
            today,
        }
    }

    fn filter_bar(&self) -> Line<'static> {
        let key = Style::default().fg(Color::Cyan);
        let skill = self.filter.skill.as_deref().unwrap_or("Todas");
        Line::from(vec![
            Span::styled("(d) ", key),
            Span::raw(format!("Período: {}   ", self.filter.date.label())),
            Span::styled("(s) ", key),
            Span::raw(format!("Habilidade: {skill}   ")),
            Span::styled("(r) ", key),
            Span::raw(format!("Nota: {}", self.filter.rating.label())),
        ])
    }
}

impl Component for HistoryView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [bar_area, table_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(self.filter_bar()), bar_area);

        let visible = filter_exchanges(self.exchanges, self.filter, self.today);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Histórico de trocas ");

        if visible.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Nenhuma troca encontrada para estes filtros.",
                    Style::default().fg(Color::DarkGray),
                ))
                .block(block),
                table_area,
            );
        } else {
            let rows = visible.iter().map(|e| {
                Row::new(vec![
                    Cell::from(format_date(e.date)),
                    Cell::from(e.partner.clone()),
                    Cell::from(e.skills.join(", ")),
                    Cell::from(Span::styled(e.status.label(), status_style(e.status))),
                    Cell::from(match e.rating {
                        Some(r) => Span::styled(stars(f32::from(r)), Style::default().fg(Color::Yellow)),
                        None => Span::styled("—", Style::default().fg(Color::DarkGray)),
                    }),
                ])
            });
            let header = Row::new(vec!["Data", "Parceiro", "Habilidades", "Status", "Avaliação"])
                .style(Style::default().add_modifier(Modifier::BOLD));
            let table = Table::new(
                rows,
                [
                    Constraint::Length(10),
                    Constraint::Length(18),
                    Constraint::Min(20),
                    Constraint::Length(10),
                    Constraint::Length(9),
                ],
            )
            .header(header)
            .column_spacing(2)
            .block(block);
            frame.render_widget(table, table_area);
        }

        let average = average_rating(&visible)
            .map(|avg| format!(" · média {avg:.1}"))
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("{} trocas{average}", visible.len()),
                Style::default().fg(Color::DarkGray),
            )),
            footer_area,
        );
    }
}
