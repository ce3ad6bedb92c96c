//! # Conversation List Component
//!
//! Sidebar with one entry per thread:
//!
//! ```text
//! ● João Silva          14:32
//!   Digitando...          (2)
//! ```
//!
//! Stateless: the selection lives in core `App`, so this only renders and
//! computes the neighbour ids used by Up/Down.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};
use unicode_width::UnicodeWidthStr;

use crate::core::conversation::Conversation;
use crate::tui::component::Component;
use crate::tui::components::message::format_time;

/// Previews longer than this many chars are cut and suffixed with "...".
pub const PREVIEW_CHARS: usize = 20;
pub const TYPING_PREVIEW: &str = "Digitando...";

/// Sidebar preview: typing notice, or the last message cut to [`PREVIEW_CHARS`].
pub fn preview(conversation: &Conversation) -> String {
    if conversation.typing {
        return TYPING_PREVIEW.to_string();
    }
    let text = &conversation.last_message;
    if text.chars().count() > PREVIEW_CHARS {
        let cut: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        text.clone()
    }
}

/// Id of the thread `delta` rows away from the active one, clamped to the list.
/// With nothing selected, moving down picks the first thread and up the last.
pub fn neighbour(conversations: &[Conversation], active: Option<&str>, delta: isize) -> Option<String> {
    if conversations.is_empty() {
        return None;
    }
    let last = conversations.len() - 1;
    let index = match active.and_then(|id| conversations.iter().position(|c| c.id == id)) {
        Some(i) => i.saturating_add_signed(delta).min(last),
        None if delta < 0 => last,
        None => 0,
    };
    Some(conversations[index].id.clone())
}

pub struct ConversationList<'a> {
    pub conversations: &'a [Conversation],
    pub active: Option<&'a str>,
    pub focused: bool,
}

impl<'a> ConversationList<'a> {
    pub fn new(conversations: &'a [Conversation], active: Option<&'a str>, focused: bool) -> Self {
        Self {
            conversations,
            active,
            focused,
        }
    }

    fn item(conversation: &Conversation, selected: bool, width: usize) -> ListItem<'static> {
        let base = if selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };

        let dot = if conversation.is_online {
            Span::styled("● ", base.fg(Color::Green))
        } else {
            Span::styled("○ ", base.fg(Color::DarkGray))
        };
        let time = format_time(conversation.last_message_time);
        let name_width = width.saturating_sub(2 + time.width() + 1);
        let name = format!("{:<name_width$}", conversation.partner);
        let header = Line::from(vec![
            dot,
            Span::styled(name, base.add_modifier(Modifier::BOLD)),
            Span::styled(" ", base),
            Span::styled(time, base.fg(Color::DarkGray)),
        ]);

        let preview_style = if conversation.typing {
            base.fg(Color::Cyan).add_modifier(Modifier::ITALIC)
        } else {
            base.fg(Color::Gray)
        };
        let mut body = vec![
            Span::styled("  ", base),
            Span::styled(preview(conversation), preview_style),
        ];
        if conversation.unread > 0 {
            body.push(Span::styled(
                format!(" ({})", conversation.unread),
                base.fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }

        let skill = Line::from(Span::styled(
            format!("  {}", conversation.skill),
            base.fg(Color::DarkGray),
        ));

        ListItem::new(vec![header, Line::from(body), skill])
    }
}

impl Component for ConversationList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(border))
            .title(" Conversas ")
            .padding(Padding::horizontal(1));
        let width = block.inner(area).width as usize;

        let items: Vec<ListItem> = self
            .conversations
            .iter()
            .map(|c| Self::item(c, self.active == Some(c.id.as_str()), width))
            .collect();

        let mut list_state = ListState::default();
        list_state.select(
            self.active
                .and_then(|id| self.conversations.iter().position(|c| c.id == id)),
        );
        frame.render_stateful_widget(List::new(items).block(block), area, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::conversation;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn preview_truncates_after_twenty_chars() {
        let mut conv = conversation("1");
        conv.last_message = "12345678901234567890".to_string();
        assert_eq!(preview(&conv), "12345678901234567890");

        conv.last_message = "Perfeito! Vamos marcar para amanhã".to_string();
        assert_eq!(preview(&conv), "Perfeito! Vamos marc...");
    }

    #[test]
    fn preview_counts_chars_not_bytes() {
        let mut conv = conversation("1");
        conv.last_message = "áéíóúáéíóúáéíóúáéíóú".to_string();
        assert_eq!(preview(&conv), "áéíóúáéíóúáéíóúáéíóú");
    }

    #[test]
    fn typing_overrides_preview() {
        let mut conv = conversation("1");
        conv.last_message = "Oi".to_string();
        conv.typing = true;
        assert_eq!(preview(&conv), TYPING_PREVIEW);
    }

    #[test]
    fn neighbour_clamps_at_edges() {
        let list = vec![conversation("a"), conversation("b"), conversation("c")];
        assert_eq!(neighbour(&list, Some("a"), -1).as_deref(), Some("a"));
        assert_eq!(neighbour(&list, Some("a"), 1).as_deref(), Some("b"));
        assert_eq!(neighbour(&list, Some("c"), 1).as_deref(), Some("c"));
        assert_eq!(neighbour(&list, None, 1).as_deref(), Some("a"));
        assert_eq!(neighbour(&list, None, -1).as_deref(), Some("c"));
        assert_eq!(neighbour(&[], None, 1), None);
    }

    #[test]
    fn renders_unread_badge_and_name() {
        let mut conv = conversation("1");
        conv.partner = "Maria Souza".to_string();
        conv.last_message = "Até logo".to_string();
        let list = vec![conv];

        let mut terminal = Terminal::new(TestBackend::new(36, 6)).unwrap();
        terminal
            .draw(|f| ConversationList::new(&list, Some("1"), true).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Maria Souza"));
        assert!(text.contains("Até logo (3)"));
    }
}
