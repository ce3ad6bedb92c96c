//! # Reviews Page
//!
//! Rating summary, sort selector and the review cards with likes and
//! owner replies. `r` opens an inline reply draft for the highlighted card.

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::reviews::{Review, ReviewBoard, star_breakdown};
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Five-slot star string, e.g. 4.5 → `★★★★½`.
pub fn stars(rating: f32) -> String {
    let (full, half, empty) = star_breakdown(rating);
    format!(
        "{}{}{}",
        "★".repeat(usize::from(full)),
        "½".repeat(usize::from(half)),
        "☆".repeat(usize::from(empty))
    )
}

/// Highlighted card and the reply being typed, if any.
#[derive(Debug, Default)]
pub struct ReviewsCursor {
    pub index: usize,
    pub reply_draft: Option<String>,
}

/// Map a key press on the reviews page to a core action.
pub fn action_for(board: &ReviewBoard, cursor: &mut ReviewsCursor, event: &TuiEvent) -> Option<Action> {
    let review = board.reviews().get(cursor.index)?;

    if let Some(draft) = cursor.reply_draft.as_mut() {
        match event {
            TuiEvent::InputChar(c) => draft.push(*c),
            TuiEvent::Paste(text) => draft.push_str(text),
            TuiEvent::Backspace => {
                draft.pop();
            }
            TuiEvent::Escape => cursor.reply_draft = None,
            TuiEvent::Submit => {
                let text = cursor.reply_draft.take().unwrap_or_default();
                return Some(Action::ReplyToReview {
                    review_id: review.id.clone(),
                    text,
                });
            }
            _ => {}
        }
        return None;
    }

    match event {
        TuiEvent::InputChar('o') => Some(Action::SetReviewSort(board.sort.next())),
        TuiEvent::InputChar('l') => Some(Action::ToggleReviewLike(review.id.clone())),
        TuiEvent::InputChar('r') => {
            cursor.reply_draft = Some(String::new());
            None
        }
        TuiEvent::CursorUp => {
            cursor.index = cursor.index.saturating_sub(1);
            None
        }
        TuiEvent::CursorDown => {
            cursor.index = (cursor.index + 1).min(board.reviews().len().saturating_sub(1));
            None
        }
        _ => None,
    }
}

pub struct ReviewsView<'a> {
    pub board: &'a ReviewBoard,
    pub cursor: &'a ReviewsCursor,
}

impl<'a> ReviewsView<'a> {
    pub fn new(board: &'a ReviewBoard, cursor: &'a ReviewsCursor) -> Self {
        Self { board, cursor }
    }

    fn summary(&self) -> Line<'static> {
        let count = self.board.reviews().len();
        let average = match self.board.average_rating() {
            Some(avg) => format!("{} {:.1}", stars(avg), avg),
            None => "Sem avaliações".to_string(),
        };
        Line::from(vec![
            Span::styled(average, Style::default().fg(Color::Yellow)),
            Span::raw(format!("  ({count} avaliações)  ")),
            Span::styled(
                format!("Ordenar: {} (o)", self.board.sort.label()),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }

    fn card_lines(&self, review: &Review, highlighted: bool) -> Vec<Line<'static>> {
        let name_style = if highlighted {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let like_style = if review.liked {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(review.author.clone(), name_style),
                Span::styled(
                    format!(" · {}", review.role),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(vec![
                Span::styled(stars(review.rating), Style::default().fg(Color::Yellow)),
                Span::raw(format!(" {:.1}  {}", review.rating, format_date(review.date))),
            ]),
            Line::from(review.comment.clone()),
            Line::from(vec![
                Span::styled(format!("♥ {}", review.likes), like_style),
                Span::styled(
                    format!("  {} respostas", review.replies.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
        ];
        for reply in &review.replies {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  ↳ {} ({}): ", reply.author, format_date(reply.date)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(reply.comment.clone()),
            ]));
        }
        if highlighted && let Some(draft) = &self.cursor.reply_draft {
            lines.push(Line::from(vec![
                Span::styled("  Responder: ", Style::default().fg(Color::Cyan)),
                Span::raw(format!("{draft}▏")),
            ]));
        }
        lines.push(Line::default());
        lines
    }
}

impl Component for ReviewsView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [summary_area, cards_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(self.summary()), summary_area);

        let lines: Vec<Line> = self
            .board
            .reviews()
            .iter()
            .enumerate()
            .flat_map(|(i, r)| self.card_lines(r, i == self.cursor.index))
            .collect();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Avaliações recebidas ");
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            cards_area,
        );

        let hint = if self.cursor.reply_draft.is_some() {
            "Enter enviar resposta · Esc cancelar"
        } else {
            "↑↓ navegar · l curtir · r responder · o ordenar"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))),
            footer_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reviews::ReviewSort;
    use crate::core::seed;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn star_strings() {
        assert_eq!(stars(5.0), "★★★★★");
        assert_eq!(stars(4.5), "★★★★½");
        assert_eq!(stars(4.8), "★★★★½");
        assert_eq!(stars(3.0), "★★★☆☆");
    }

    #[test]
    fn sort_like_and_reply_keys() {
        let board = ReviewBoard::new(seed::reviews());
        let mut cursor = ReviewsCursor::default();

        assert_eq!(
            action_for(&board, &mut cursor, &TuiEvent::InputChar('o')),
            Some(Action::SetReviewSort(ReviewSort::Relevant))
        );
        assert_eq!(
            action_for(&board, &mut cursor, &TuiEvent::InputChar('l')),
            Some(Action::ToggleReviewLike("1".into()))
        );

        action_for(&board, &mut cursor, &TuiEvent::CursorDown);
        action_for(&board, &mut cursor, &TuiEvent::InputChar('r'));
        for c in "Valeu!".chars() {
            action_for(&board, &mut cursor, &TuiEvent::InputChar(c));
        }
        assert_eq!(
            action_for(&board, &mut cursor, &TuiEvent::Submit),
            Some(Action::ReplyToReview {
                review_id: "2".into(),
                text: "Valeu!".into()
            })
        );
        assert!(cursor.reply_draft.is_none());
    }

    #[test]
    fn escape_cancels_reply() {
        let board = ReviewBoard::new(seed::reviews());
        let mut cursor = ReviewsCursor::default();
        action_for(&board, &mut cursor, &TuiEvent::InputChar('r'));
        // 'l' is text while drafting, not a like
        assert_eq!(action_for(&board, &mut cursor, &TuiEvent::InputChar('l')), None);
        action_for(&board, &mut cursor, &TuiEvent::Escape);
        assert!(cursor.reply_draft.is_none());
    }

    #[test]
    fn renders_cards_with_replies() {
        let board = ReviewBoard::new(seed::reviews());
        let cursor = ReviewsCursor::default();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|f| ReviewsView::new(&board, &cursor).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(text.contains("Carlos Oliveira"));
        assert!(text.contains("15/06/2023"));
        assert!(text.contains("♥ 24"));
        assert!(text.contains("↳ Você"));
        assert!(text.contains("Mais recentes"));
    }
}
