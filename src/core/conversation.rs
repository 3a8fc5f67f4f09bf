use serde::{Deserialize, Serialize};

use crate::core::message::{stamped_id, Message, Role};

pub const DEFAULT_CONVERSATION_ID: &str = "default";
pub const DEFAULT_TITLE: &str = "New Chat";

/// Titles derived from a first message keep at most this many characters.
pub const TITLE_MAX_CHARS: usize = 25;
const TITLE_ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

impl Conversation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            thread_id: None,
        }
    }

    pub fn default_conversation() -> Self {
        Self::new(DEFAULT_CONVERSATION_ID)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|message| message.id == id)
    }

    pub fn message_mut(&mut self, id: &str) -> Option<&mut Message> {
        self.messages.iter_mut().find(|message| message.id == id)
    }

    /// Allocates a time-stamped id for a new message of `role` that does not
    /// clash with any message already in this conversation.
    pub fn next_message_id(&self, role: Role) -> String {
        unique_id(stamped_id(role.as_str()), |candidate| {
            self.message(candidate).is_some()
        })
    }
}

/// Title for a conversation whose first user message is `text`.
pub fn title_from_first_message(text: &str) -> String {
    match text.char_indices().nth(TITLE_MAX_CHARS) {
        Some((cut, _)) => format!("{}{TITLE_ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// Appends `-2`, `-3`, ... to `base` until `taken` reports it free.
pub(crate) fn unique_id(base: String, taken: impl Fn(&str) -> bool) -> String {
    if !taken(&base) {
        return base;
    }
    let mut suffix = 2u32;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
