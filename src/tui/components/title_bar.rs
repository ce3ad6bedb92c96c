//! # TitleBar Component
//!
//! Top bar showing the page tabs, the signed-in user and status notices.
//!
//! ## Layout
//!
//! ```text
//! SkillSwap  F1 Mensagens  F2 Matches  F3 Rede  F4 Histórico  F5 Avaliações  F6 Conquistas | Você | ↓ Novo
//! ```
//!
//! The active tab is highlighted. Before sign-in only the brand and the
//! status are shown, since the tabs cannot be reached yet.
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational: every field is a prop copied from
//! `App` (page, user, status) or from the TUI state (unseen content).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::Page;
use crate::tui::component::Component;

pub struct TitleBar {
    pub active: Page,
    pub signed_in: bool,
    pub user_name: String,
    pub status_message: String,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(
        active: Page,
        signed_in: bool,
        user_name: String,
        status_message: String,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            active,
            signed_in,
            user_name,
            status_message,
            has_unseen_content,
        }
    }

    fn tab_spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (i, page) in Page::TABS.iter().enumerate() {
            let label = format!(" F{} {} ", i + 1, page.title());
            let style = if *page == self.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(label, style));
        }
        spans
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "SkillSwap ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];

        if self.signed_in {
            spans.extend(self.tab_spans());
            spans.push(Span::raw(format!(" | {}", self.user_name)));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        if self.has_unseen_content {
            spans.push(Span::styled(" | ↓ Novo", Style::default().fg(Color::Yellow)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
