//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Timers
//!
//! `Effect::Schedule` from the core is handed to a [`Scheduler`], which sends
//! the action back over the `mpsc` channel drained at the bottom of the loop.
//! Leaving the loop cancels everything still pending.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (someone typing, an auth request in flight): draws every
//!   ~120ms so the typing dots move.
//! - **Idle**: sleeps up to 250ms, only redraws on events or delivered actions.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod command;
mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::Page;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::scheduler::Scheduler;
use crate::core::state::App;
use crate::tui::command::{ComposerCommand, expand_home, pending_file};
use crate::tui::component::EventHandler;
use crate::tui::components::conversation_list::neighbour;
use crate::tui::components::{
    ComposerBox, ComposerEvent, MessageListState, NetworkCursor, ReviewsCursor,
    achievements_view, forgot_password, history_view, login, matches_view, network_view,
    register, reviews_view,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub composer_box: ComposerBox,
    pub matches_cursor: usize,
    pub network_cursor: NetworkCursor,
    pub reviews_cursor: ReviewsCursor,
    pub achievements_cursor: usize,
    /// Thread shown last frame, to reset scroll when it changes
    shown_conversation: Option<String>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            composer_box: ComposerBox::new(),
            matches_cursor: 0,
            network_cursor: NetworkCursor::default(),
            reviews_cursor: ReviewsCursor::default(),
            achievements_cursor: 0,
            shown_conversation: None,
        }
    }

    /// Pull core state the components mirror locally.
    fn sync(&mut self, app: &App) {
        self.composer_box.sync(app.composer());
        let active = app.active_conversation_id();
        if self.shown_conversation.as_deref() != active {
            self.shown_conversation = active.map(str::to_string);
            self.message_list.reset();
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty protocol is harmlessly ignored by terminals that lack it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Translate a composer slash command into actions. Errors go to the status bar.
fn composer_command(app: &mut App, command: ComposerCommand) -> Vec<Action> {
    let clear = Action::SetDraft(String::new());
    match command {
        ComposerCommand::Attach(path) => {
            let path = expand_home(path);
            if !path.is_file() {
                app.status_message = format!("Arquivo não encontrado: {}", path.display());
                return Vec::new();
            }
            match pending_file(path) {
                Ok(file) => vec![Action::AddAttachment(file), clear],
                Err(e) => {
                    app.status_message = e.to_string();
                    Vec::new()
                }
            }
        }
        ComposerCommand::Detach(index) => vec![Action::RemoveAttachment(index), clear],
        ComposerCommand::Done => vec![Action::MarkCompleted, clear],
    }
}

fn messages_actions(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    match event {
        TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
            tui.message_list.handle_event(event);
            Vec::new()
        }
        TuiEvent::CursorUp | TuiEvent::CursorDown => {
            let delta = if matches!(event, TuiEvent::CursorUp) { -1 } else { 1 };
            neighbour(app.conversations(), app.active_conversation_id(), delta)
                .map(|id| vec![Action::SelectConversation(Some(id))])
                .unwrap_or_default()
        }
        TuiEvent::Escape => vec![Action::SelectConversation(None)],
        TuiEvent::MarkCompleted => vec![Action::MarkCompleted],
        _ if app.active_conversation_id().is_none() => Vec::new(),
        _ => match tui.composer_box.handle_event(event) {
            Some(ComposerEvent::Changed(text)) => vec![Action::SetDraft(text)],
            Some(ComposerEvent::Submit(text)) => match command::parse(&text) {
                None => match command::literal(&text) {
                    Some(message) => vec![Action::SetDraft(message), Action::Send],
                    None => vec![Action::Send],
                },
                Some(Ok(command)) => composer_command(app, command),
                Some(Err(e)) => {
                    app.status_message = e.to_string();
                    Vec::new()
                }
            },
            None => Vec::new(),
        },
    }
}

/// Map one terminal event to the core actions it triggers.
fn actions_for_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    match event {
        TuiEvent::ForceQuit => return vec![Action::Quit],
        TuiEvent::Resize => return Vec::new(),
        TuiEvent::SwitchTab(i) => {
            return Page::TABS
                .get(*i)
                .map(|page| vec![Action::Navigate(*page)])
                .unwrap_or_default();
        }
        _ => {}
    }

    match app.page {
        Page::Login => login::action_for(&app.login, event).into_iter().collect(),
        Page::Register => register::action_for(&app.register, event).into_iter().collect(),
        Page::ForgotPassword => forgot_password::action_for(&app.recovery, event)
            .into_iter()
            .collect(),
        Page::Messages => messages_actions(app, tui, event),
        Page::Matches => matches_view::action_for(&app.matches, &mut tui.matches_cursor, event)
            .into_iter()
            .collect(),
        Page::Network => {
            network_view::action_for(&app.network, &mut tui.network_cursor, event)
                .into_iter()
                .collect()
        }
        Page::History => history_view::action_for(&app.exchanges, &app.history_filter, event)
            .into_iter()
            .collect(),
        Page::Reviews => {
            reviews_view::action_for(&app.reviews, &mut tui.reviews_cursor, event)
                .into_iter()
                .collect()
        }
        Page::Achievements => {
            achievements_view::action_for(&app.achievements, &mut tui.achievements_cursor, event)
                .into_iter()
                .collect()
        }
    }
}

/// Run one action through the core and carry out its effect.
/// Returns `true` when the app should quit.
fn apply(app: &mut App, scheduler: &Scheduler, action: Action) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::Schedule { delay, action } => {
            scheduler.schedule(delay, action);
            false
        }
        Effect::None => false,
    }
}

fn is_animating(app: &App) -> bool {
    app.login.is_loading
        || app.register.is_loading
        || app.recovery.is_loading
        || app.conversations().iter().any(|c| c.typing)
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions delivered by scheduled timers
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(tx);
    for effect in app.startup_effects() {
        if let Effect::Schedule { delay, action } = effect {
            scheduler.schedule(delay, action);
        }
    }

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    while !should_quit {
        tui.sync(&app);
        tui.composer_box.focused = app.page == Page::Messages;

        let animating = is_animating(&app);
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_millis() / 400) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(120)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            for action in actions_for_event(&mut app, &mut tui, &event) {
                if apply(&mut app, &scheduler, action) {
                    should_quit = true;
                }
            }
            tui.sync(&app);
            if should_quit {
                break;
            }
        }

        // Actions delivered by timers (simulated replies, typing, auth requests)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(&mut app, &scheduler, action) {
                should_quit = true;
            }
        }
    }

    info!("Shutting down");
    scheduler.cancel_all();
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::Sender;
    use crate::test_support::test_app;

    /// Feed events through the same path as the event loop, without a terminal.
    fn feed(app: &mut App, tui: &mut TuiState, scheduler: &Scheduler, events: &[TuiEvent]) {
        for event in events {
            for action in actions_for_event(app, tui, event) {
                apply(app, scheduler, action);
            }
            tui.sync(app);
        }
    }

    fn typed(text: &str) -> Vec<TuiEvent> {
        text.chars().map(TuiEvent::InputChar).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn typing_and_enter_sends_then_reply_arrives() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, rx) = mpsc::channel();
        let scheduler = Scheduler::new(tx);

        let mut events = typed("Olá");
        events.push(TuiEvent::Submit);
        feed(&mut app, &mut tui, &scheduler, &events);

        let thread = app.active_conversation().unwrap();
        assert_eq!(thread.messages.len(), 5);
        assert_eq!(thread.last().unwrap().text, "Olá");
        assert_eq!(tui.composer_box.buffer(), "");

        tokio::time::sleep(Duration::from_millis(2001)).await;
        let action = rx.try_recv().unwrap();
        apply(&mut app, &scheduler, action);
        let last = app.active_conversation().unwrap().last().unwrap();
        assert_eq!(last.sender(), Sender::Them);
    }

    #[tokio::test]
    async fn blank_enter_sends_nothing() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();
        let scheduler = Scheduler::new(tx);

        feed(&mut app, &mut tui, &scheduler, &typed("   "));
        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::Submit]);
        assert_eq!(app.active_conversation().unwrap().messages.len(), 4);
    }

    #[tokio::test]
    async fn arrows_change_thread_and_escape_deselects() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();
        let scheduler = Scheduler::new(tx);

        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::CursorDown]);
        assert_eq!(app.active_conversation_id(), Some("2"));
        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::Escape]);
        assert_eq!(app.active_conversation_id(), None);

        // Typing with nothing selected goes nowhere
        feed(&mut app, &mut tui, &scheduler, &typed("x"));
        assert_eq!(app.composer().text(), "");
    }

    #[tokio::test]
    async fn slash_commands_update_composer() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();
        let scheduler = Scheduler::new(tx);

        let mut events = typed("/detach 9");
        events.push(TuiEvent::Submit);
        feed(&mut app, &mut tui, &scheduler, &events);
        assert_eq!(app.composer().text(), "");

        let mut events = typed("/nada");
        events.push(TuiEvent::Submit);
        feed(&mut app, &mut tui, &scheduler, &events);
        assert!(app.status_message.contains("Comando desconhecido"));

        let mut events = typed("/attach /nao/existe.png");
        events.push(TuiEvent::Submit);
        feed(&mut app, &mut tui, &scheduler, &events);
        assert!(app.status_message.contains("Arquivo não encontrado"));
        assert!(app.composer().attachments().is_empty());

        let mut events = typed("/done");
        events.push(TuiEvent::Submit);
        feed(&mut app, &mut tui, &scheduler, &events);
        assert!(app.active_conversation().unwrap().is_completed());
    }

    #[tokio::test]
    async fn function_keys_switch_pages() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();
        let scheduler = Scheduler::new(tx);

        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::SwitchTab(4)]);
        assert_eq!(app.page, Page::Reviews);
        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::InputChar('o')]);
        assert_eq!(app.reviews.sort, crate::core::reviews::ReviewSort::Relevant);
        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::SwitchTab(9)]);
        assert_eq!(app.page, Page::Reviews);
    }

    #[tokio::test]
    async fn double_slash_sends_literal_slash_message() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();
        let scheduler = Scheduler::new(tx);

        let mut events = typed("//s não entendi");
        events.push(TuiEvent::Submit);
        feed(&mut app, &mut tui, &scheduler, &events);

        let thread = app.active_conversation().unwrap();
        assert_eq!(thread.messages.len(), 5);
        assert_eq!(thread.last().unwrap().text, "/s não entendi");
        assert!(!app.status_message.contains("Comando desconhecido"));
        assert_eq!(tui.composer_box.buffer(), "");
    }

    #[tokio::test]
    async fn login_shortcuts_reach_sign_up_and_back() {
        let mut config = crate::test_support::test_config();
        config.start_page = Page::Login;
        let mut app = App::from_config(&config);
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();
        let scheduler = Scheduler::new(tx);

        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::Control('r')]);
        assert_eq!(app.page, Page::Register);
        feed(&mut app, &mut tui, &scheduler, &typed("Ana"));
        assert_eq!(app.register.form.name, "Ana");
        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::Escape]);
        assert_eq!(app.page, Page::Login);

        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::Control('f')]);
        assert_eq!(app.page, Page::ForgotPassword);
        // Tabs stay closed until sign-in
        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::SwitchTab(0)]);
        assert_eq!(app.page, Page::ForgotPassword);
    }

    #[tokio::test]
    async fn network_and_achievement_keys_reach_core() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();
        let scheduler = Scheduler::new(tx);

        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::SwitchTab(2)]);
        assert_eq!(app.page, Page::Network);
        let mut events = vec![TuiEvent::InputChar('2'), TuiEvent::Submit];
        events.push(TuiEvent::InputChar('/'));
        events.extend(typed("pedro"));
        feed(&mut app, &mut tui, &scheduler, &events);
        assert_eq!(app.network.connections().len(), 4);
        assert_eq!(app.network.filter.search, "pedro");

        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::SwitchTab(5)]);
        assert_eq!(app.page, Page::Achievements);
        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::Submit]);
        assert_eq!(app.achievements.opened().map(|b| b.id.as_str()), Some("1"));
        feed(&mut app, &mut tui, &scheduler, &[TuiEvent::Escape]);
        assert!(app.achievements.opened().is_none());
    }

    #[test]
    fn force_quit_always_quits() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(
            actions_for_event(&mut app, &mut tui, &TuiEvent::ForceQuit),
            vec![Action::Quit]
        );
    }
}
