use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Page;
use crate::core::conversation::Conversation;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    AchievementsView, ConversationList, ForgotPasswordView, HistoryView, LoginView, MatchesView,
    MessageList, NetworkView, RegisterView, ReviewsView, TitleBar,
};

/// Sidebar width on the messages page.
const SIDEBAR_WIDTH: u16 = 34;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, body_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    let mut title_bar = TitleBar::new(
        app.page,
        app.signed_in,
        app.user_name.clone(),
        app.status_message.clone(),
        app.page == Page::Messages && tui.message_list.has_unseen_content(),
    );
    title_bar.render(frame, title_area);

    match app.page {
        Page::Login => LoginView::new(&app.login).render(frame, body_area),
        Page::Register => RegisterView::new(&app.register).render(frame, body_area),
        Page::ForgotPassword => ForgotPasswordView::new(&app.recovery).render(frame, body_area),
        Page::Messages => draw_messages(frame, body_area, app, tui, spinner_frame),
        Page::Matches => MatchesView::new(&app.matches, tui.matches_cursor).render(frame, body_area),
        Page::Network => {
            NetworkView::new(&app.network, tui.network_cursor).render(frame, body_area)
        }
        Page::History => HistoryView::new(
            &app.exchanges,
            &app.history_filter,
            Local::now().date_naive(),
        )
        .render(frame, body_area),
        Page::Reviews => {
            ReviewsView::new(&app.reviews, &tui.reviews_cursor).render(frame, body_area)
        }
        Page::Achievements => AchievementsView::new(&app.achievements, tui.achievements_cursor)
            .render(frame, body_area),
    }
}

fn draw_messages(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [sidebar_area, thread_area] =
        Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(area);

    let active = app.active_conversation();
    ConversationList::new(app.conversations(), app.active_conversation_id(), active.is_none())
        .render(frame, sidebar_area);

    let Some(conversation) = active else {
        draw_empty_thread(frame, thread_area);
        return;
    };

    let composer_height = tui.composer_box.calculate_height();
    let [header_area, list_area, composer_area] =
        Layout::vertical([Length(2), Min(0), Length(composer_height)]).areas(thread_area);

    frame.render_widget(Paragraph::new(thread_header(conversation)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    ), header_area);

    MessageList::new(&mut tui.message_list, conversation, spinner_frame).render(frame, list_area);
    tui.composer_box.render(frame, composer_area);
}

fn thread_header(conversation: &Conversation) -> Line<'static> {
    let presence = if conversation.typing {
        Span::styled("digitando...", Style::default().fg(Color::Cyan))
    } else if conversation.is_online {
        Span::styled("● online", Style::default().fg(Color::Green))
    } else {
        Span::styled("○ offline", Style::default().fg(Color::DarkGray))
    };
    let skill_style = if conversation.is_completed() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            conversation.partner.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" · "),
        Span::styled(conversation.skill.clone(), skill_style),
        Span::raw("  "),
        presence,
    ])
}

fn draw_empty_thread(frame: &mut Frame, area: Rect) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(area);
    let text = vec![
        Line::from(Span::styled(
            "Selecione uma conversa",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled(
            "↑↓ para escolher um parceiro de troca",
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
    ];
    frame.render_widget(Paragraph::new(text), middle);
}
