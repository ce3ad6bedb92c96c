//! # Actions
//!
//! Everything that can happen in SkillSwap becomes an `Action`.
//! User presses Enter in the composer? That's `Action::Send`.
//! The demo partner "answers"? That's `Action::ReplyArrived { .. }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates it, and returns an `Effect` describing any deferred work.
//! No timers run here. They are handed to the scheduler as `Effect::Schedule`.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: `assert_eq!(update(&mut app, action), expected)`.
//! And debuggable: log every action, replay the exact session.

use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};

use crate::Page;
use crate::core::achievements::BadgeFilter;
use crate::core::composer::PendingFile;
use crate::core::conversation::{
    Attachment, AttachmentKind, DeliveryStatus, Message, Sender,
};
use crate::core::forms::Field;
use crate::core::matches::MatchStatus;
use crate::core::network::{ExportFormat, NetworkTab};
use crate::core::reviews::ReviewSort;
use crate::core::state::{App, RecoveryState, RegisterState, ThreadPhase};

/// How long the sign-up success notice stays up before returning to login.
pub const REGISTER_REDIRECT_DELAY: Duration = Duration::from_secs(2);
pub const REGISTER_SUCCESS: &str = "Cadastro realizado com sucesso! Redirecionando...";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Page),

    // Messages page
    SelectConversation(Option<String>),
    SetDraft(String),
    AddAttachment(PendingFile),
    RemoveAttachment(usize),
    Send,
    ReplyArrived { conversation_id: String },
    TypingCleared { conversation_id: String },
    MarkCompleted,

    // Login page
    LoginInput { field: Field, value: String },
    FocusLoginField(Field),
    SubmitLogin,
    LoginCompleted,

    // Sign-up and password recovery
    RegisterInput { field: Field, value: String },
    FocusRegisterField(Field),
    SubmitRegister,
    RegisterCompleted,
    RegisterRedirect,
    RecoveryInput(String),
    SubmitRecovery,
    RecoveryCompleted,
    ResendRecovery,

    // Matches / network / reviews / history / achievements
    SetMatchFilter(MatchStatus),
    ToggleMatch(String),
    SetNetworkTab(NetworkTab),
    SetNetworkSearch(String),
    CycleNetworkSkill,
    CycleNetworkLocation,
    Connect(String),
    RemoveConnection(String),
    ExportNetwork(ExportFormat),
    SetReviewSort(ReviewSort),
    ToggleReviewLike(String),
    ReplyToReview { review_id: String, text: String },
    CycleHistoryDate,
    CycleHistoryRating,
    SetHistorySkill(Option<String>),
    SetBadgeFilter(BadgeFilter),
    OpenBadge(Option<String>),

    Quit,
}

/// Side effects requested by `update()`, executed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Feed `action` back into `update()` once `delay` has elapsed.
    Schedule { delay: Duration, action: Action },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Navigate(page) => {
            // Auth pages before sign-in, everything else after
            if page.is_auth() == app.signed_in {
                debug!("Ignoring navigation to {:?} (signed_in={})", page, app.signed_in);
                return Effect::None;
            }
            app.page = page;
            app.status_message = page.title().to_string();
            if page == Page::Messages {
                return open_messages(app);
            }
            Effect::None
        }

        Action::SelectConversation(id) => {
            if let Some(ref id) = id
                && !app.store.contains(id)
            {
                warn!("Ignoring selection of unknown conversation '{}'", id);
                return Effect::None;
            }
            if let Some(previous) = app.active.clone()
                && app.thread_phase(&previous) == ThreadPhase::Composing
            {
                app.set_phase(&previous, ThreadPhase::Idle);
            }
            app.active = id;
            sync_composing_phase(app);
            Effect::None
        }

        Action::SetDraft(text) => {
            app.composer.set_text(text);
            sync_composing_phase(app);
            Effect::None
        }

        Action::AddAttachment(file) => {
            info!("Attachment added: {} ({})", file.name, file.mime);
            app.composer.add_attachment(file);
            sync_composing_phase(app);
            Effect::None
        }

        Action::RemoveAttachment(index) => {
            if app.composer.remove_attachment(index).is_none() {
                debug!("RemoveAttachment({}) out of range", index);
            }
            sync_composing_phase(app);
            Effect::None
        }

        Action::Send => send(app),

        Action::ReplyArrived { conversation_id } => {
            let now = Utc::now();
            let id = app.store.next_message_id(now);
            let reply = Message::new(
                id,
                Sender::Them,
                app.messaging.reply_text.clone(),
                now,
                DeliveryStatus::Delivered,
            );
            if app.store.append_message(&conversation_id, reply) {
                app.store.set_typing(&conversation_id, false);
                app.set_phase(&conversation_id, ThreadPhase::ReplyReceived);
                info!("Simulated reply delivered to conversation {}", conversation_id);
            }
            Effect::None
        }

        Action::TypingCleared { conversation_id } => {
            app.store.set_typing(&conversation_id, false);
            Effect::None
        }

        Action::MarkCompleted => {
            if let Some(id) = app.active.clone()
                && app.store.mark_completed(&id)
            {
                app.status_message = String::from("Troca marcada como concluída");
            }
            Effect::None
        }

        Action::LoginInput { field, value } => {
            match field {
                Field::Email => app.login.form.email = value,
                Field::Password => app.login.form.password = value,
                Field::Name | Field::ConfirmPassword => {
                    warn!("Login form has no {:?} field", field);
                    return Effect::None;
                }
            }
            // Editing a field clears its error
            app.login.errors.retain(|e| e.field != field);
            Effect::None
        }

        Action::FocusLoginField(field) => {
            app.login.focus = field;
            Effect::None
        }

        Action::SubmitLogin => {
            if app.login.is_loading {
                return Effect::None;
            }
            app.login.errors = app.login.form.validate();
            if !app.login.errors.is_empty() {
                debug!("Login rejected: {} field error(s)", app.login.errors.len());
                return Effect::None;
            }
            app.login.is_loading = true;
            app.status_message = String::from("Entrando...");
            Effect::Schedule {
                delay: app.login_delay,
                action: Action::LoginCompleted,
            }
        }

        Action::LoginCompleted => {
            app.login.is_loading = false;
            app.login.form.password.clear();
            app.signed_in = true;
            app.page = Page::Messages;
            app.status_message = format!("Olá, {}!", app.login.form.email);
            info!("Simulated login completed");
            open_messages(app)
        }

        Action::RegisterInput { field, value } => {
            *app.register.value_mut(field) = value;
            app.register.errors.retain(|e| e.field != field);
            Effect::None
        }

        Action::FocusRegisterField(field) => {
            app.register.focus = field;
            Effect::None
        }

        Action::SubmitRegister => {
            if app.register.is_loading || app.register.success.is_some() {
                return Effect::None;
            }
            app.register.errors = app.register.form.validate();
            if !app.register.errors.is_empty() {
                debug!("Sign-up rejected: {} field error(s)", app.register.errors.len());
                return Effect::None;
            }
            app.register.is_loading = true;
            app.status_message = String::from("Criando conta...");
            Effect::Schedule {
                delay: app.login_delay,
                action: Action::RegisterCompleted,
            }
        }

        Action::RegisterCompleted => {
            app.register.is_loading = false;
            app.register.success = Some(REGISTER_SUCCESS);
            app.status_message = String::from(REGISTER_SUCCESS);
            info!("Simulated sign-up completed");
            Effect::Schedule {
                delay: REGISTER_REDIRECT_DELAY,
                action: Action::RegisterRedirect,
            }
        }

        Action::RegisterRedirect => {
            app.register = RegisterState::default();
            if app.page == Page::Register {
                app.page = Page::Login;
                app.status_message = String::from("Faça login com sua nova conta");
            }
            Effect::None
        }

        Action::RecoveryInput(value) => {
            app.recovery.form.email = value;
            app.recovery.errors.clear();
            Effect::None
        }

        Action::SubmitRecovery => {
            if app.recovery.is_loading || app.recovery.sent {
                return Effect::None;
            }
            app.recovery.errors = app.recovery.form.validate();
            if !app.recovery.errors.is_empty() {
                return Effect::None;
            }
            app.recovery.is_loading = true;
            app.status_message = String::from("Enviando...");
            Effect::Schedule {
                delay: app.login_delay,
                action: Action::RecoveryCompleted,
            }
        }

        Action::RecoveryCompleted => {
            app.recovery.is_loading = false;
            app.recovery.sent = true;
            app.status_message = format!("Link enviado para {}", app.recovery.form.email);
            info!("Simulated password recovery e-mail sent");
            Effect::None
        }

        Action::ResendRecovery => {
            if app.recovery.sent {
                app.recovery = RecoveryState::default();
            }
            Effect::None
        }

        Action::SetMatchFilter(status) => {
            app.matches.set_filter(status);
            Effect::None
        }

        Action::ToggleMatch(id) => {
            app.matches.toggle_selected(&id);
            Effect::None
        }

        Action::SetNetworkTab(tab) => {
            app.network.tab = tab;
            Effect::None
        }

        Action::SetNetworkSearch(text) => {
            app.network.filter.search = text;
            Effect::None
        }

        Action::CycleNetworkSkill => {
            app.network.cycle_skill();
            Effect::None
        }

        Action::CycleNetworkLocation => {
            app.network.cycle_location();
            Effect::None
        }

        Action::Connect(id) => {
            match app.network.connect(&id, Utc::now().date_naive()) {
                Some(name) => app.status_message = format!("Agora você está conectado com {name}"),
                None => warn!("Connect: unknown suggestion '{}'", id),
            }
            Effect::None
        }

        Action::RemoveConnection(id) => {
            if app.network.remove(&id) {
                app.status_message = String::from("Conexão removida");
            } else {
                warn!("RemoveConnection: unknown connection '{}'", id);
            }
            Effect::None
        }

        Action::ExportNetwork(format) => {
            info!("Network report requested as {}", format.label());
            app.status_message = format!("Relatório gerado como {} com sucesso!", format.label());
            Effect::None
        }

        Action::SetReviewSort(sort) => {
            app.reviews.set_sort(sort);
            app.status_message = format!("Ordenar: {}", sort.label());
            Effect::None
        }

        Action::ToggleReviewLike(id) => {
            if app.reviews.toggle_like(&id).is_none() {
                warn!("ToggleReviewLike: unknown review '{}'", id);
            }
            Effect::None
        }

        Action::ReplyToReview { review_id, text } => {
            let today = Utc::now().date_naive();
            let author = app.user_name.clone();
            if app.reviews.submit_reply(&review_id, &author, &text, today) {
                app.status_message = String::from("Resposta enviada");
            }
            Effect::None
        }

        Action::CycleHistoryDate => {
            app.history_filter.date = app.history_filter.date.next();
            Effect::None
        }

        Action::CycleHistoryRating => {
            app.history_filter.rating = app.history_filter.rating.next();
            Effect::None
        }

        Action::SetHistorySkill(skill) => {
            app.history_filter.skill = skill;
            Effect::None
        }

        Action::SetBadgeFilter(filter) => {
            app.achievements.filter = filter;
            app.achievements.open(None);
            Effect::None
        }

        Action::OpenBadge(id) => {
            app.achievements.open(id.as_deref());
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

/// The first visit to the messages page starts the seeded typing timer.
fn open_messages(app: &mut App) -> Effect {
    if std::mem::replace(&mut app.messages_opened, true) {
        return Effect::None;
    }
    debug!("Messages page opened for the first time");
    app.typing_clear_effect()
}

/// Composing while the active thread has anything in the composer.
fn sync_composing_phase(app: &mut App) {
    let Some(id) = app.active.clone() else {
        return;
    };
    let phase = app.thread_phase(&id);
    if !app.composer.is_empty() {
        app.set_phase(&id, ThreadPhase::Composing);
    } else if phase == ThreadPhase::Composing {
        app.set_phase(&id, ThreadPhase::Idle);
    }
}

fn attachment_from_file(file: PendingFile, audio_placeholder_secs: u32) -> Attachment {
    let kind = AttachmentKind::classify(&file.mime);
    Attachment {
        kind,
        locator: format!("blob:skillswap/{}", uuid::Uuid::new_v4()),
        duration_secs: file
            .mime
            .contains("audio")
            .then_some(audio_placeholder_secs),
        name: Some(file.name),
    }
}

fn send(app: &mut App) -> Effect {
    let Some(conversation_id) = app.active.clone() else {
        debug!("Send ignored: no active conversation");
        return Effect::None;
    };
    if !app.composer.can_send() {
        debug!("Send ignored: composer is empty");
        return Effect::None;
    }

    let placeholder = app.messaging.audio_placeholder_secs;
    let attachments: Vec<Attachment> = app
        .composer
        .attachments()
        .iter()
        .cloned()
        .map(|f| attachment_from_file(f, placeholder))
        .collect();

    let now = Utc::now();
    let message = Message::new(
        app.store.next_message_id(now),
        Sender::Me,
        app.composer.text().trim(),
        now,
        DeliveryStatus::Sent,
    )
    .with_attachments(attachments);

    if !app.store.append_message(&conversation_id, message) {
        return Effect::None;
    }
    app.composer.clear();
    app.set_phase(&conversation_id, ThreadPhase::Sent);
    info!("Message sent to conversation {}", conversation_id);

    if app.is_demo(&conversation_id) {
        debug!(
            "Scheduling simulated reply for {} in {:?}",
            conversation_id, app.messaging.reply_delay
        );
        return Effect::Schedule {
            delay: app.messaging.reply_delay,
            action: Action::ReplyArrived { conversation_id },
        };
    }
    Effect::None
}
