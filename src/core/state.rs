//! # Application State
//!
//! Core business state for SkillSwap. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── page: Page                     // current top-level page
//! ├── signed_in: bool                // past the (simulated) login
//! ├── status_message: String         // status bar text
//! ├── store: ConversationStore       // seeded threads
//! ├── active: Option<String>         // open conversation id
//! ├── composer: Composer             // draft text + pending files
//! ├── phases: HashMap<id, ThreadPhase>
//! ├── login: LoginState              // form draft, errors, loading flag
//! ├── register: RegisterState
//! ├── recovery: RecoveryState        // forgot-password flow
//! ├── matches: MatchBoard
//! ├── network: NetworkBoard
//! ├── reviews: ReviewBoard
//! ├── achievements: AchievementBoard
//! └── exchanges + history_filter
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::Page;
use crate::core::achievements::AchievementBoard;
use crate::core::action::{Action, Effect};
use crate::core::composer::Composer;
use crate::core::config::{MessagingSettings, ResolvedConfig};
use crate::core::conversation::{Conversation, ConversationStore};
use crate::core::forms::{Field, FieldError, ForgotPasswordForm, LoginForm, RegisterForm};
use crate::core::history::{Exchange, HistoryFilter};
use crate::core::matches::MatchBoard;
use crate::core::network::NetworkBoard;
use crate::core::reviews::ReviewBoard;
use crate::core::seed;

/// Where a single thread is in the compose → send → reply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadPhase {
    #[default]
    Idle,
    Composing,
    Sent,
    ReplyReceived,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginState {
    pub form: LoginForm,
    pub errors: Vec<FieldError>,
    pub focus: Field,
    pub is_loading: bool,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            form: LoginForm::default(),
            errors: Vec::new(),
            focus: Field::Email,
            is_loading: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterState {
    pub form: RegisterForm,
    pub errors: Vec<FieldError>,
    pub focus: Field,
    pub is_loading: bool,
    /// Shown after a successful sign-up, until the redirect back to login.
    pub success: Option<&'static str>,
}

impl Default for RegisterState {
    fn default() -> Self {
        Self {
            form: RegisterForm::default(),
            errors: Vec::new(),
            focus: Field::Name,
            is_loading: false,
            success: None,
        }
    }
}

impl RegisterState {
    pub const FIELDS: [Field; 4] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.form.name,
            Field::Email => &self.form.email,
            Field::Password => &self.form.password,
            Field::ConfirmPassword => &self.form.confirm_password,
        }
    }

    pub(crate) fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.form.name,
            Field::Email => &mut self.form.email,
            Field::Password => &mut self.form.password,
            Field::ConfirmPassword => &mut self.form.confirm_password,
        }
    }
}

/// Forgot-password flow: enter an e-mail, then a "link sent" notice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryState {
    pub form: ForgotPasswordForm,
    pub errors: Vec<FieldError>,
    pub is_loading: bool,
    pub sent: bool,
}

pub struct App {
    pub page: Page,
    pub signed_in: bool,
    pub status_message: String,
    pub user_name: String,
    pub messaging: MessagingSettings,
    pub login_delay: Duration,
    pub(crate) store: ConversationStore,
    pub(crate) active: Option<String>,
    pub(crate) composer: Composer,
    pub(crate) phases: HashMap<String, ThreadPhase>,
    /// Set once the messages page has been shown; its first visit starts
    /// the demo thread's typing timer.
    pub(crate) messages_opened: bool,
    pub login: LoginState,
    pub register: RegisterState,
    pub recovery: RecoveryState,
    pub matches: MatchBoard,
    pub network: NetworkBoard,
    pub reviews: ReviewBoard,
    pub achievements: AchievementBoard,
    pub exchanges: Vec<Exchange>,
    pub history_filter: HistoryFilter,
}

impl App {
    /// Build the app from seed data, with conversation timestamps relative to `now`.
    pub fn new(config: &ResolvedConfig, now: DateTime<Utc>) -> Self {
        let store = ConversationStore::new(seed::conversations(now));
        let active = store
            .list_conversations()
            .first()
            .map(|c| c.id.clone());

        Self {
            page: config.start_page,
            signed_in: !config.start_page.is_auth(),
            status_message: String::from("Bem-vindo ao SkillSwap!"),
            user_name: config.user_name.clone(),
            messaging: config.messaging.clone(),
            login_delay: config.login_delay,
            store,
            active,
            composer: Composer::new(),
            phases: HashMap::new(),
            messages_opened: config.start_page == Page::Messages,
            login: LoginState::default(),
            register: RegisterState::default(),
            recovery: RecoveryState::default(),
            matches: MatchBoard::new(seed::matches(), seed::suggested_matches()),
            network: NetworkBoard::new(seed::connections(), seed::suggested_connections()),
            reviews: ReviewBoard::new(seed::reviews()),
            achievements: AchievementBoard::new(seed::badges()),
            exchanges: seed::exchanges(),
            history_filter: HistoryFilter::default(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config, Utc::now())
    }

    /// Deferred work to start with the app. Only the messages page has any,
    /// and only when the app opens straight onto it.
    pub fn startup_effects(&self) -> Vec<Effect> {
        if self.page != Page::Messages {
            return Vec::new();
        }
        match self.typing_clear_effect() {
            Effect::None => Vec::new(),
            effect => vec![effect],
        }
    }

    /// The demo thread's seeded typing indicator clears itself a while after
    /// the thread is first shown.
    pub(crate) fn typing_clear_effect(&self) -> Effect {
        let demo = &self.messaging.demo_conversation;
        match self.store.get_active(Some(demo)) {
            Some(conversation) if conversation.typing => Effect::Schedule {
                delay: self.messaging.typing_clear_delay,
                action: Action::TypingCleared {
                    conversation_id: demo.clone(),
                },
            },
            _ => Effect::None,
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        self.store.list_conversations()
    }

    pub fn active_conversation_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.store.get_active(self.active.as_deref())
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn thread_phase(&self, conversation_id: &str) -> ThreadPhase {
        self.phases.get(conversation_id).copied().unwrap_or_default()
    }

    pub(crate) fn set_phase(&mut self, conversation_id: &str, phase: ThreadPhase) {
        self.phases.insert(conversation_id.to_string(), phase);
    }

    pub fn is_demo(&self, conversation_id: &str) -> bool {
        self.messaging.demo_conversation == conversation_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_app, test_config};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Bem-vindo ao SkillSwap!");
        assert_eq!(app.page, Page::Messages);
        assert!(app.signed_in);
        assert_eq!(app.active_conversation_id(), Some("1"));
        assert_eq!(app.conversations().len(), 3);
        assert!(app.composer().is_empty());
    }

    #[test]
    fn test_login_start_page_is_signed_out() {
        let mut config = test_config();
        config.start_page = Page::Login;
        let app = App::new(&config, Utc::now());
        assert!(!app.signed_in);
        assert_eq!(app.page, Page::Login);
        assert!(app.startup_effects().is_empty(), "typing timer waits for the messages page");
    }

    #[test]
    fn test_auth_start_pages_are_signed_out() {
        for page in [Page::Register, Page::ForgotPassword] {
            let mut config = test_config();
            config.start_page = page;
            assert!(!App::new(&config, Utc::now()).signed_in, "{page:?}");
        }
        let mut config = test_config();
        config.start_page = Page::Network;
        let app = App::new(&config, Utc::now());
        assert!(app.signed_in);
        assert!(app.startup_effects().is_empty());
    }

    #[test]
    fn test_register_fields_map_to_form() {
        let mut register = RegisterState::default();
        for field in RegisterState::FIELDS {
            register.value_mut(field).push('x');
        }
        assert_eq!(register.value(Field::ConfirmPassword), "x");
        assert_eq!(register.form.name, "x");
    }

    #[test]
    fn test_startup_schedules_typing_clear_for_demo_only() {
        let app = test_app();
        let effects = app.startup_effects();
        assert_eq!(
            effects,
            vec![Effect::Schedule {
                delay: Duration::from_secs(3),
                action: Action::TypingCleared {
                    conversation_id: "1".into()
                },
            }]
        );
    }

    #[test]
    fn test_no_typing_clear_when_demo_not_typing() {
        let mut config = test_config();
        config.messaging.demo_conversation = "2".into();
        let app = App::new(&config, Utc::now());
        assert!(app.startup_effects().is_empty());
    }

    #[test]
    fn test_phase_defaults_to_idle() {
        let app = test_app();
        assert_eq!(app.thread_phase("1"), ThreadPhase::Idle);
        assert_eq!(app.thread_phase("unknown"), ThreadPhase::Idle);
    }
}
