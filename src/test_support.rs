//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::time::Duration;

use chrono::Utc;

use crate::Page;
use crate::core::config::{MessagingSettings, ResolvedConfig};
use crate::core::conversation::{Conversation, ConversationStore};
use crate::core::state::App;

/// Resolved config with defaults, independent of env vars and the home directory.
pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        start_page: Page::Messages,
        user_name: "Você".to_string(),
        messaging: MessagingSettings::default(),
        login_delay: Duration::from_millis(1500),
    }
}

/// Creates a signed-in test App on the messages page.
pub fn test_app() -> App {
    App::new(&test_config(), Utc::now())
}

/// An empty conversation with three unread messages.
pub fn conversation(id: &str) -> Conversation {
    Conversation {
        id: id.to_string(),
        partner: format!("Parceiro {id}"),
        partner_avatar: String::new(),
        skill: "Rust".to_string(),
        last_message: String::new(),
        last_message_time: Utc::now(),
        unread: 3,
        is_online: false,
        typing: false,
        messages: Vec::new(),
    }
}

pub fn store_with(conversations: Vec<Conversation>) -> ConversationStore {
    ConversationStore::new(conversations)
}
