//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `TitleBar`: page tabs, user and status
//! - `ConversationList`: thread sidebar
//! - `Bubble`: one chat message
//! - `LoginView`, `RegisterView`, `ForgotPasswordView`: the signed-out cards,
//!   built from the shared pieces in `auth_form`
//! - `MatchesView`, `NetworkView`, `HistoryView`, `ReviewsView`,
//!   `AchievementsView`: page bodies
//!
//! Page views whose state lives in core `App` expose an `action_for`
//! function that maps a `TuiEvent` to a core `Action`.
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `ComposerBox`: message input, emits `ComposerEvent`
//! - `MessageList`: scrollable thread view with layout caching
//!
//! ### Props-Based Data Flow
//!
//! Components never reach into `App` themselves:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! ConversationList::new(app.conversations(), app.active_conversation_id(), true)
//!     .render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs                (this file)
//! ├── title_bar.rs          (top bar)
//! ├── conversation_list.rs  (thread sidebar)
//! ├── message.rs            (chat bubble)
//! ├── message_list.rs       (scrollable thread + typing row)
//! ├── composer_box.rs       (message input)
//! ├── auth_form.rs          (shared card, fields and editing)
//! ├── login.rs
//! ├── register.rs
//! ├── forgot_password.rs
//! ├── matches_view.rs
//! ├── network_view.rs
//! ├── history_view.rs
//! ├── reviews_view.rs
//! └── achievements_view.rs  (badge list + detail overlay)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod achievements_view;
pub mod auth_form;
pub mod composer_box;
pub mod conversation_list;
pub mod forgot_password;
pub mod history_view;
pub mod login;
pub mod matches_view;
pub mod message;
pub mod message_list;
pub mod network_view;
pub mod register;
pub mod reviews_view;

pub use achievements_view::AchievementsView;

pub use composer_box::{ComposerBox, ComposerEvent};
pub use conversation_list::ConversationList;
pub use forgot_password::ForgotPasswordView;
pub use history_view::HistoryView;
pub use login::LoginView;
pub use matches_view::MatchesView;
pub use message_list::{MessageList, MessageListState};
pub use network_view::{NetworkCursor, NetworkView};
pub use register::RegisterView;
pub use reviews_view::{ReviewsCursor, ReviewsView};
