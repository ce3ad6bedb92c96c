//! # Conversation Store
//!
//! In-memory conversation threads for the messages page.
//!
//! ```text
//! ConversationStore
//! └── conversations: Vec<Conversation>   // insertion order, seeded at startup
//!     └── messages: Vec<Message>         // oldest first
//!         └── attachments: Vec<Attachment>
//! ```
//!
//! The store owns every conversation. Callers get shared borrows from
//! [`ConversationStore::list_conversations`] and [`ConversationStore::get_active`];
//! all mutation goes through the store's `&mut self` methods, which is the only
//! path `update()` uses.

use chrono::{DateTime, Utc};
use log::{debug, warn};

/// Preview text used when a message carries attachments but no text.
pub const ATTACHMENT_PREVIEW: &str = "Arquivo enviado";

/// Suffix appended to a conversation's skill tag once the exchange is done.
pub const COMPLETED_SUFFIX: &str = " (Concluído)";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Me,
    Them,
}

/// Delivery status. Ordered: `Sent < Delivered < Read`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Read,
}

/// What an attachment is, derived from its declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Document,
    Audio,
}

impl AttachmentKind {
    /// Classify a declared MIME string.
    ///
    /// Substring match, checked in order: "image" → Image, "pdf" → Document,
    /// everything else → Audio. The fallback also catches types that are not
    /// audio at all (e.g. `text/plain`); those are logged so they show up.
    pub fn classify(mime: &str) -> Self {
        if mime.contains("image") {
            AttachmentKind::Image
        } else if mime.contains("pdf") {
            AttachmentKind::Document
        } else {
            if !mime.contains("audio") {
                warn!("Unrecognized attachment MIME '{}', treating as audio", mime);
            }
            AttachmentKind::Audio
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub kind: AttachmentKind,
    /// Session-scoped resource locator (`blob:` token or seeded URL).
    pub locator: String,
    pub name: Option<String>,
    /// Playback length in seconds (audio only).
    pub duration_secs: Option<u32>,
}

impl Attachment {
    pub fn new(kind: AttachmentKind, locator: impl Into<String>) -> Self {
        Self {
            kind,
            locator: locator.into(),
            name: None,
            duration_secs: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: String,
    sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    status: DeliveryStatus,
    pub attachments: Vec<Attachment>,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        sender: Sender,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
        status: DeliveryStatus,
    ) -> Self {
        Self {
            id: id.into(),
            sender,
            text: text.into(),
            timestamp,
            status,
            attachments: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn status(&self) -> DeliveryStatus {
        self.status
    }

    pub fn is_mine(&self) -> bool {
        self.sender == Sender::Me
    }

    /// Move the status forward. Returns `false` (and leaves the status alone)
    /// when `next` would move it backwards.
    pub fn advance_status(&mut self, next: DeliveryStatus) -> bool {
        if next < self.status {
            return false;
        }
        self.status = next;
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: String,
    pub partner: String,
    pub partner_avatar: String,
    pub skill: String,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub unread: u32,
    pub is_online: bool,
    pub typing: bool,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn is_completed(&self) -> bool {
        self.skill.ends_with(COMPLETED_SUFFIX)
    }
}

/// Owner of all conversation threads.
#[derive(Debug, Default)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    /// Last issued message id, in epoch milliseconds.
    last_id: i64,
}

impl ConversationStore {
    pub fn new(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations,
            last_id: 0,
        }
    }

    /// All conversations in insertion order.
    pub fn list_conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// The conversation matching `id`, or `None` if `id` is `None` or unknown.
    pub fn get_active(&self, id: Option<&str>) -> Option<&Conversation> {
        let id = id?;
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.conversations.iter().any(|c| c.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    /// Time-derived message id, strictly increasing within this store.
    pub fn next_message_id(&mut self, now: DateTime<Utc>) -> String {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id.to_string()
    }

    /// Append `message` to the conversation with `conversation_id`.
    ///
    /// Updates the preview and last-message time; self-authored messages also
    /// reset the unread counter. Returns `false` when no conversation matches.
    pub fn append_message(&mut self, conversation_id: &str, message: Message) -> bool {
        let Some(conversation) = self.get_mut(conversation_id) else {
            warn!("append_message: unknown conversation '{}'", conversation_id);
            return false;
        };

        if !message.text.is_empty() {
            conversation.last_message = message.text.clone();
        } else if !message.attachments.is_empty() {
            conversation.last_message = ATTACHMENT_PREVIEW.to_string();
        }
        conversation.last_message_time = message.timestamp;
        if message.is_mine() {
            conversation.unread = 0;
        }

        debug!(
            "Appended message {} to conversation {} ({} messages)",
            message.id,
            conversation_id,
            conversation.messages.len() + 1
        );
        conversation.messages.push(message);
        true
    }

    pub fn set_typing(&mut self, conversation_id: &str, typing: bool) -> bool {
        match self.get_mut(conversation_id) {
            Some(conversation) => {
                conversation.typing = typing;
                true
            }
            None => false,
        }
    }

    /// Tag the exchange as completed. Idempotent.
    pub fn mark_completed(&mut self, conversation_id: &str) -> bool {
        match self.get_mut(conversation_id) {
            Some(conversation) if !conversation.is_completed() => {
                conversation.skill.push_str(COMPLETED_SUFFIX);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{conversation, store_with};

    fn text_message(id: &str, sender: Sender, text: &str) -> Message {
        Message::new(id, sender, text, Utc::now(), DeliveryStatus::Sent)
    }

    #[test]
    fn classify_mime_types() {
        assert_eq!(AttachmentKind::classify("image/png"), AttachmentKind::Image);
        assert_eq!(AttachmentKind::classify("application/pdf"), AttachmentKind::Document);
        assert_eq!(AttachmentKind::classify("audio/mpeg"), AttachmentKind::Audio);
    }

    #[test]
    fn classify_unknown_falls_back_to_audio() {
        assert_eq!(AttachmentKind::classify("text/plain"), AttachmentKind::Audio);
        assert_eq!(AttachmentKind::classify(""), AttachmentKind::Audio);
    }

    #[test]
    fn get_active_none_and_unknown() {
        let store = store_with(vec![conversation("a"), conversation("b")]);
        assert!(store.get_active(None).is_none());
        assert!(store.get_active(Some("zzz")).is_none());
        assert_eq!(store.get_active(Some("b")).map(|c| c.id.as_str()), Some("b"));
    }

    #[test]
    fn list_keeps_insertion_order() {
        let store = store_with(vec![conversation("b"), conversation("a"), conversation("c")]);
        let ids: Vec<_> = store.list_conversations().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn append_updates_preview_and_resets_unread_for_self() {
        let mut store = store_with(vec![conversation("a")]);
        assert!(store.append_message("a", text_message("1", Sender::Me, "oi")));

        let a = store.get_active(Some("a")).unwrap();
        assert_eq!(a.messages.len(), 1);
        assert_eq!(a.last_message, "oi");
        assert_eq!(a.unread, 0);
    }

    #[test]
    fn append_from_partner_keeps_unread() {
        let mut store = store_with(vec![conversation("a")]);
        store.append_message("a", text_message("1", Sender::Them, "olá"));
        assert_eq!(store.get_active(Some("a")).unwrap().unread, 3);
    }

    #[test]
    fn append_attachment_only_uses_label() {
        let mut store = store_with(vec![conversation("a")]);
        let msg = text_message("1", Sender::Me, "").with_attachments(vec![Attachment::new(
            AttachmentKind::Image,
            "blob:x",
        )]);
        store.append_message("a", msg);
        assert_eq!(store.get_active(Some("a")).unwrap().last_message, ATTACHMENT_PREVIEW);
    }

    #[test]
    fn append_to_unknown_is_noop() {
        let mut store = store_with(vec![conversation("a")]);
        let before = store.list_conversations().to_vec();
        assert!(!store.append_message("nope", text_message("1", Sender::Me, "x")));
        assert_eq!(store.list_conversations(), before.as_slice());
    }

    #[test]
    fn append_is_isolated_per_conversation() {
        let mut store = store_with(vec![conversation("a"), conversation("b")]);
        let b_before = store.get_active(Some("b")).unwrap().clone();
        store.append_message("a", text_message("1", Sender::Me, "só para A"));
        assert_eq!(store.get_active(Some("b")).unwrap(), &b_before);
    }

    #[test]
    fn message_ids_strictly_increase() {
        let mut store = ConversationStore::default();
        let now = Utc::now();
        let first: i64 = store.next_message_id(now).parse().unwrap();
        let second: i64 = store.next_message_id(now).parse().unwrap();
        assert_eq!(first, now.timestamp_millis());
        assert_eq!(second, first + 1);
    }

    #[test]
    fn status_only_moves_forward() {
        let mut msg = text_message("1", Sender::Me, "x");
        assert!(msg.advance_status(DeliveryStatus::Read));
        assert!(!msg.advance_status(DeliveryStatus::Delivered));
        assert_eq!(msg.status(), DeliveryStatus::Read);
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let mut store = store_with(vec![conversation("a")]);
        assert!(store.mark_completed("a"));
        assert!(!store.mark_completed("a"));
        let skill = &store.get_active(Some("a")).unwrap().skill;
        assert_eq!(skill.matches(COMPLETED_SUFFIX).count(), 1);
    }
}
