//! # Network Page
//!
//! Active connections and suggestions behind two tabs, with a search box
//! and skill/location filters that apply to both.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::network::{Connection, ExportFormat, NetworkBoard, NetworkTab};
use crate::tui::component::Component;
use crate::tui::components::reviews_view::format_date;
use crate::tui::event::TuiEvent;

/// Highlighted card, and whether keys currently edit the search box.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetworkCursor {
    pub index: usize,
    pub searching: bool,
}

pub fn action_for(board: &NetworkBoard, cursor: &mut NetworkCursor, event: &TuiEvent) -> Option<Action> {
    if cursor.searching {
        let mut search = board.filter.search.clone();
        match event {
            TuiEvent::InputChar(c) => search.push(*c),
            TuiEvent::Paste(text) => search.push_str(text.trim()),
            TuiEvent::Backspace => {
                search.pop()?;
            }
            TuiEvent::Submit | TuiEvent::Escape => {
                cursor.searching = false;
                return None;
            }
            _ => return None,
        }
        cursor.index = 0;
        return Some(Action::SetNetworkSearch(search));
    }

    let visible = board.visible();
    match event {
        TuiEvent::InputChar(c @ '1'..='2') => {
            let index = (*c as usize) - ('1' as usize);
            cursor.index = 0;
            Some(Action::SetNetworkTab(NetworkTab::ALL[index]))
        }
        TuiEvent::InputChar('/') => {
            cursor.searching = true;
            None
        }
        TuiEvent::InputChar('s') => {
            cursor.index = 0;
            Some(Action::CycleNetworkSkill)
        }
        TuiEvent::InputChar('l') => {
            cursor.index = 0;
            Some(Action::CycleNetworkLocation)
        }
        TuiEvent::InputChar('p') => Some(Action::ExportNetwork(ExportFormat::Pdf)),
        TuiEvent::InputChar('c') => Some(Action::ExportNetwork(ExportFormat::Csv)),
        TuiEvent::CursorUp => {
            cursor.index = cursor.index.saturating_sub(1);
            None
        }
        TuiEvent::CursorDown => {
            cursor.index = (cursor.index + 1).min(visible.len().saturating_sub(1));
            None
        }
        TuiEvent::Submit if board.tab == NetworkTab::Suggestions => {
            let id = visible.get(cursor.index)?.id.clone();
            cursor.index = cursor.index.min(visible.len().saturating_sub(2));
            Some(Action::Connect(id))
        }
        TuiEvent::InputChar('x') | TuiEvent::Delete if board.tab == NetworkTab::Active => {
            let id = visible.get(cursor.index)?.id.clone();
            cursor.index = cursor.index.min(visible.len().saturating_sub(2));
            Some(Action::RemoveConnection(id))
        }
        _ => None,
    }
}

pub struct NetworkView<'a> {
    pub board: &'a NetworkBoard,
    pub cursor: NetworkCursor,
}

impl<'a> NetworkView<'a> {
    pub fn new(board: &'a NetworkBoard, cursor: NetworkCursor) -> Self {
        Self { board, cursor }
    }

    fn header(&self) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                "Minha Rede",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "{} conexões ativas • {} sugestões",
                    self.board.connections().len(),
                    self.board.suggestions().len()
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }

    fn filter_bar(&self) -> Line<'static> {
        let filter = &self.board.filter;
        let search = if self.cursor.searching {
            Span::styled(
                format!("Buscar: {}▏", filter.search),
                Style::default().fg(Color::Cyan),
            )
        } else if filter.search.is_empty() {
            Span::styled("Buscar: (/)", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(format!("Buscar: {}", filter.search))
        };
        let skill = filter.skill.as_deref().unwrap_or("Todas");
        let location = filter.location.as_deref().unwrap_or("Todas");
        Line::from(vec![
            search,
            Span::raw(format!("   Habilidade: {skill} (s)   Localização: {location} (l)")),
        ])
    }

    fn tabs(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, tab) in NetworkTab::ALL.iter().enumerate() {
            let count = match tab {
                NetworkTab::Active => self.board.connections().len(),
                NetworkTab::Suggestions => self.board.suggestions().len(),
            };
            let style = if *tab == self.board.tab {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} {} ({count}) ", i + 1, tab.label()), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn card_lines(&self, connection: &Connection, highlighted: bool) -> Vec<Line<'static>> {
        let name_style = if highlighted {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let mut meta = format!(
            "  {} · {} conexões em comum",
            connection.location, connection.mutual_connections
        );
        if let Some(date) = connection.connected_on {
            meta.push_str(&format!(" · Conectado em {}", format_date(date)));
        }
        let skills_label = match self.board.tab {
            NetworkTab::Active => "Habilidades em comum",
            NetworkTab::Suggestions => "Habilidades complementares",
        };
        vec![
            Line::from(vec![
                Span::styled(connection.name.clone(), name_style),
                Span::styled(
                    format!(" · {}", connection.role),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(Span::styled(meta, Style::default().fg(Color::Gray))),
            Line::from(vec![
                Span::styled(format!("  {skills_label}: "), Style::default().fg(Color::Cyan)),
                Span::raw(connection.skills.join(", ")),
            ]),
            Line::default(),
        ]
    }

    fn empty_state(&self) -> Vec<Line<'static>> {
        let (title, hint) = match self.board.tab {
            NetworkTab::Active => (
                "Nenhuma conexão encontrada",
                "Tente ajustar seus filtros de busca.",
            ),
            NetworkTab::Suggestions => (
                "Nenhuma sugestão no momento",
                "Volte mais tarde para novas sugestões.",
            ),
        };
        vec![
            Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        ]
    }
}

impl Component for NetworkView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, filter_area, tabs_area, cards_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(self.header()), header_area);
        frame.render_widget(Paragraph::new(self.filter_bar()), filter_area);
        frame.render_widget(Paragraph::new(self.tabs()), tabs_area);

        let visible = self.board.visible();
        let lines: Vec<Line> = if visible.is_empty() {
            self.empty_state()
        } else {
            visible
                .iter()
                .enumerate()
                .flat_map(|(i, c)| self.card_lines(c, i == self.cursor.index))
                .collect()
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            cards_area,
        );

        let hint = if self.cursor.searching {
            "Digite para buscar · Enter/Esc concluir"
        } else {
            match self.board.tab {
                NetworkTab::Active => "↑↓ navegar · x remover · / buscar · p PDF · c CSV",
                NetworkTab::Suggestions => "↑↓ navegar · Enter conectar · / buscar · p PDF · c CSV",
            }
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))),
            footer_area,
        );
    }
}
