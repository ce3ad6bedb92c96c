use std::collections::HashSet;
use std::sync::mpsc;
use std::time::Duration;

use chrono::Utc;
use skillswap::Page;
use skillswap::core::action::{Action, Effect, update};
use skillswap::core::composer::PendingFile;
use skillswap::core::config::{MessagingSettings, ResolvedConfig, load_config_from, resolve};
use skillswap::core::conversation::{AttachmentKind, DeliveryStatus, Sender};
use skillswap::core::forms::Field;
use skillswap::core::scheduler::Scheduler;
use skillswap::core::seed::{DEMO_CONVERSATION_ID, DEMO_REPLY_TEXT};
use skillswap::core::state::{App, ThreadPhase};

// ============================================================================
// Helper Functions
// ============================================================================

fn config(start_page: Page) -> ResolvedConfig {
    ResolvedConfig {
        start_page,
        user_name: "Você".to_string(),
        messaging: MessagingSettings::default(),
        login_delay: Duration::from_millis(1500),
    }
}

/// Runs `action` and hands any scheduled follow-up to `scheduler`.
fn dispatch(app: &mut App, scheduler: &Scheduler, action: Action) -> Effect {
    let effect = update(app, action);
    if let Effect::Schedule { delay, action } = &effect {
        scheduler.schedule(*delay, action.clone());
    }
    effect
}

/// Applies every action the timers have delivered so far, scheduling any
/// follow-ups the way the event loop does.
fn drain(app: &mut App, scheduler: &Scheduler, rx: &mpsc::Receiver<Action>) -> usize {
    let mut count = 0;
    while let Ok(action) = rx.try_recv() {
        dispatch(app, scheduler, action);
        count += 1;
    }
    count
}

fn demo_typing(app: &App) -> bool {
    app.conversations()
        .iter()
        .find(|c| c.id == DEMO_CONVERSATION_ID)
        .is_some_and(|c| c.typing)
}

fn sign_in(app: &mut App, scheduler: &Scheduler) {
    dispatch(app, scheduler, Action::LoginInput { field: Field::Email, value: "ana@skillswap.com".into() });
    dispatch(app, scheduler, Action::LoginInput { field: Field::Password, value: "segredo".into() });
    dispatch(app, scheduler, Action::SubmitLogin);
}

// ============================================================================
// Send pipeline
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_demo_thread_gets_scripted_reply_after_two_seconds() {
    let mut app = App::new(&config(Page::Messages), Utc::now());
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(tx);

    dispatch(&mut app, &scheduler, Action::SelectConversation(Some(DEMO_CONVERSATION_ID.into())));
    dispatch(&mut app, &scheduler, Action::SetDraft("Olá".into()));
    assert_eq!(app.thread_phase(DEMO_CONVERSATION_ID), ThreadPhase::Composing);

    let effect = dispatch(&mut app, &scheduler, Action::Send);
    assert!(matches!(
        effect,
        Effect::Schedule { delay, .. } if delay == Duration::from_secs(2)
    ));

    let thread = app.active_conversation().unwrap();
    let sent = thread.last().unwrap();
    assert_eq!(sent.text, "Olá");
    assert_eq!(sent.sender(), Sender::Me);
    assert_eq!(sent.status(), DeliveryStatus::Sent);
    assert_eq!(thread.last_message, "Olá");
    assert_eq!(thread.unread, 0);
    assert!(app.composer().is_empty());
    assert_eq!(app.thread_phase(DEMO_CONVERSATION_ID), ThreadPhase::Sent);

    tokio::time::sleep(Duration::from_millis(1999)).await;
    assert_eq!(drain(&mut app, &scheduler, &rx), 0, "reply must not arrive early");

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(drain(&mut app, &scheduler, &rx), 1);

    let thread = app.active_conversation().unwrap();
    let reply = thread.last().unwrap();
    assert_eq!(reply.text, DEMO_REPLY_TEXT);
    assert_eq!(reply.sender(), Sender::Them);
    assert_eq!(reply.status(), DeliveryStatus::Delivered);
    assert_eq!(thread.last_message, DEMO_REPLY_TEXT);
    assert!(!thread.typing);
    assert_eq!(app.thread_phase(DEMO_CONVERSATION_ID), ThreadPhase::ReplyReceived);
}

#[tokio::test(start_paused = true)]
async fn test_other_threads_get_no_reply() {
    let mut app = App::new(&config(Page::Messages), Utc::now());
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(tx);

    dispatch(&mut app, &scheduler, Action::SelectConversation(Some("2".into())));
    dispatch(&mut app, &scheduler, Action::SetDraft("Tudo certo?".into()));
    assert_eq!(dispatch(&mut app, &scheduler, Action::Send), Effect::None);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(drain(&mut app, &scheduler, &rx), 0);
    assert_eq!(app.active_conversation().unwrap().messages.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_two_quick_sends_get_two_replies() {
    let mut app = App::new(&config(Page::Messages), Utc::now());
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(tx);

    for text in ["um", "dois"] {
        dispatch(&mut app, &scheduler, Action::SetDraft(text.into()));
        dispatch(&mut app, &scheduler, Action::Send);
    }
    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(drain(&mut app, &scheduler, &rx), 2);

    let thread = app.active_conversation().unwrap();
    let ids: HashSet<&str> = thread.messages.iter().map(|m| m.id()).collect();
    assert_eq!(thread.messages.len(), 8);
    assert_eq!(ids.len(), 8, "message ids must be unique");
}

#[tokio::test(start_paused = true)]
async fn test_attachment_only_send() {
    let mut app = App::new(&config(Page::Messages), Utc::now());
    let (tx, _rx) = mpsc::channel();
    let scheduler = Scheduler::new(tx);

    dispatch(
        &mut app,
        &scheduler,
        Action::AddAttachment(PendingFile::new("voz.ogg", "audio/ogg", "/tmp/voz.ogg")),
    );
    dispatch(&mut app, &scheduler, Action::Send);

    let thread = app.active_conversation().unwrap();
    let sent = thread.last().unwrap();
    assert!(sent.text.is_empty());
    assert_eq!(sent.attachments.len(), 1);
    assert_eq!(sent.attachments[0].kind, AttachmentKind::Audio);
    assert_eq!(sent.attachments[0].duration_secs, Some(120));
    assert_eq!(thread.last_message, "Arquivo enviado");
}

// ============================================================================
// Typing indicator and teardown
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_seeded_typing_clears_after_three_seconds() {
    let mut app = App::new(&config(Page::Messages), Utc::now());
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(tx);
    assert!(app.active_conversation().unwrap().typing);

    for effect in app.startup_effects() {
        if let Effect::Schedule { delay, action } = effect {
            scheduler.schedule(delay, action);
        }
    }

    tokio::time::sleep(Duration::from_millis(2999)).await;
    drain(&mut app, &scheduler, &rx);
    assert!(app.active_conversation().unwrap().typing);

    tokio::time::sleep(Duration::from_millis(2)).await;
    drain(&mut app, &scheduler, &rx);
    assert!(!app.active_conversation().unwrap().typing);
}

#[tokio::test(start_paused = true)]
async fn test_teardown_cancels_pending_reply() {
    let mut app = App::new(&config(Page::Messages), Utc::now());
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(tx);

    dispatch(&mut app, &scheduler, Action::SetDraft("Olá".into()));
    dispatch(&mut app, &scheduler, Action::Send);
    scheduler.cancel_all();

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(drain(&mut app, &scheduler, &rx), 0);
    assert_eq!(app.active_conversation().unwrap().last().unwrap().sender(), Sender::Me);
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_login_gate_then_simulated_sign_in() {
    let mut app = App::new(&config(Page::Login), Utc::now());
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(tx);

    dispatch(&mut app, &scheduler, Action::Navigate(Page::Matches));
    assert_eq!(app.page, Page::Login, "pages are gated until sign-in");

    dispatch(&mut app, &scheduler, Action::SubmitLogin);
    assert_eq!(app.login.errors.len(), 2);

    sign_in(&mut app, &scheduler);
    assert!(app.login.errors.is_empty());
    assert!(app.login.is_loading);

    tokio::time::sleep(Duration::from_millis(1501)).await;
    assert_eq!(drain(&mut app, &scheduler, &rx), 1);
    assert!(app.signed_in);
    assert_eq!(app.page, Page::Messages);
    assert!(app.login.form.password.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_typing_timer_starts_when_messages_first_open() {
    let mut app = App::new(&config(Page::Login), Utc::now());
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(tx);
    assert!(app.startup_effects().is_empty());
    assert!(demo_typing(&app));

    // Time spent on the login card doesn't count
    tokio::time::sleep(Duration::from_secs(5)).await;
    sign_in(&mut app, &scheduler);
    tokio::time::sleep(Duration::from_millis(1501)).await;
    assert_eq!(drain(&mut app, &scheduler, &rx), 1);
    assert_eq!(app.page, Page::Messages);
    assert!(demo_typing(&app));

    tokio::time::sleep(Duration::from_millis(2999)).await;
    drain(&mut app, &scheduler, &rx);
    assert!(demo_typing(&app));

    tokio::time::sleep(Duration::from_millis(2)).await;
    drain(&mut app, &scheduler, &rx);
    assert!(!demo_typing(&app));
}

#[tokio::test(start_paused = true)]
async fn test_typing_timer_waits_for_first_messages_visit() {
    let mut app = App::new(&config(Page::Matches), Utc::now());
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(tx);
    assert!(app.startup_effects().is_empty());

    tokio::time::sleep(Duration::from_secs(4)).await;
    dispatch(&mut app, &scheduler, Action::Navigate(Page::Messages));
    dispatch(&mut app, &scheduler, Action::Navigate(Page::Reviews));
    // A second visit must not start another timer
    dispatch(&mut app, &scheduler, Action::Navigate(Page::Messages));

    tokio::time::sleep(Duration::from_millis(2999)).await;
    assert_eq!(drain(&mut app, &scheduler, &rx), 0);
    assert!(demo_typing(&app));

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(drain(&mut app, &scheduler, &rx), 1);
    assert!(!demo_typing(&app));
}

// ============================================================================
// Sign-up and recovery
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_sign_up_redirects_to_login() {
    let mut app = App::new(&config(Page::Login), Utc::now());
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(tx);

    dispatch(&mut app, &scheduler, Action::Navigate(Page::Register));
    assert_eq!(app.page, Page::Register);
    for (field, value) in [
        (Field::Name, "Ana Lima"),
        (Field::Email, "ana@skillswap.com"),
        (Field::Password, "segredo"),
        (Field::ConfirmPassword, "segredo"),
    ] {
        dispatch(&mut app, &scheduler, Action::RegisterInput { field, value: value.into() });
    }
    dispatch(&mut app, &scheduler, Action::SubmitRegister);
    assert!(app.register.is_loading);

    tokio::time::sleep(Duration::from_millis(1501)).await;
    assert_eq!(drain(&mut app, &scheduler, &rx), 1);
    assert!(app.register.success.is_some());
    assert_eq!(app.page, Page::Register);

    tokio::time::sleep(Duration::from_millis(2001)).await;
    assert_eq!(drain(&mut app, &scheduler, &rx), 1);
    assert_eq!(app.page, Page::Login);
    assert!(!app.signed_in);
    assert!(app.register.form.name.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_recovery_link_is_simulated() {
    let mut app = App::new(&config(Page::ForgotPassword), Utc::now());
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::new(tx);

    dispatch(&mut app, &scheduler, Action::RecoveryInput("ana@skillswap.com".into()));
    dispatch(&mut app, &scheduler, Action::SubmitRecovery);
    assert!(app.recovery.is_loading);

    tokio::time::sleep(Duration::from_millis(1501)).await;
    assert_eq!(drain(&mut app, &scheduler, &rx), 1);
    assert!(app.recovery.sent);
    assert!(app.status_message.contains("ana@skillswap.com"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_overrides_defaults() {
    let dir = std::env::temp_dir().join(format!("skillswap-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(
        &path,
        "[general]\nstart_page = \"reviews\"\n\n[messaging]\ntyping_clear_ms = 500\nreply_text = \"Combinado!\"\n",
    )
    .unwrap();

    let config = tokio_test::assert_ok!(load_config_from(&path));
    let resolved = resolve(&config, Some(Page::History));
    assert_eq!(resolved.start_page, Page::History, "CLI beats the file");
    assert_eq!(resolved.messaging.typing_clear_delay, Duration::from_millis(500));
    assert_eq!(resolved.messaging.reply_text, "Combinado!");

    let _ = std::fs::remove_dir_all(&dir);
}
