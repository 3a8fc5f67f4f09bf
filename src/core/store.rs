//! In-memory conversation collection backed by a [`KeyValueStore`].
//!
//! Every transition works on a copy of the collection and swaps the finished
//! snapshot in before persisting it, so no caller can observe (or persist) a
//! half-applied update.

use std::sync::Arc;

use tracing::warn;

use crate::core::conversation::{title_from_first_message, unique_id, Conversation};
use crate::core::message::{stamped_id, Message, Role};
use crate::core::persistence::{
    load_json_or, save_json, KeyValueStore, ACTIVE_CONVERSATION_KEY, CONVERSATIONS_KEY,
};

pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active_id: String,
    persistence: Arc<dyn KeyValueStore>,
}

impl ConversationStore {
    /// Restores the collection and active id, falling back to a single
    /// default conversation when nothing usable is stored.
    pub fn load(persistence: Arc<dyn KeyValueStore>) -> Self {
        let mut conversations: Vec<Conversation> =
            load_json_or(persistence.as_ref(), CONVERSATIONS_KEY, || {
                vec![Conversation::default_conversation()]
            });
        if conversations.is_empty() {
            conversations.push(Conversation::default_conversation());
        }

        let stored_active = persistence
            .get(ACTIVE_CONVERSATION_KEY)
            .map(|raw| raw.trim().to_string())
            .filter(|id| !id.is_empty());
        let active_id = match stored_active {
            Some(id) if conversations.iter().any(|c| c.id == id) => id,
            _ => conversations[0].id.clone(),
        };

        Self {
            conversations,
            active_id,
            persistence,
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.conversations.iter().position(|c| c.id == id)
    }

    /// Id of the active conversation; always resolves to a stored conversation.
    pub fn active_id(&self) -> &str {
        &self.active().id
    }

    pub fn active(&self) -> &Conversation {
        self.get(&self.active_id)
            .unwrap_or_else(|| &self.conversations[0])
    }

    /// Activates an empty conversation if one exists, otherwise prepends a
    /// new one. Returns the id that became active.
    pub fn create_conversation(&mut self) -> String {
        self.transition(|conversations, active_id| {
            if let Some(empty) = conversations.iter().find(|c| c.is_empty()) {
                *active_id = empty.id.clone();
                return active_id.clone();
            }

            let id = unique_id(stamped_id("conv"), |candidate| {
                conversations.iter().any(|c| c.id == candidate)
            });
            conversations.insert(0, Conversation::new(id.clone()));
            *active_id = id.clone();
            id
        })
    }

    pub fn select_conversation(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        if self.active_id == id {
            return true;
        }
        self.transition(|_, active_id| {
            *active_id = id.to_string();
        });
        true
    }

    /// Removes `id`. Deleting the last conversation leaves a fresh default in
    /// its place; deleting the active one activates its previous neighbour
    /// (or the new first entry when it had none).
    pub fn delete_conversation(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let was_active = self.active_id() == id;

        self.transition(|conversations, active_id| {
            conversations.remove(index);
            if conversations.is_empty() {
                let fresh = Conversation::default_conversation();
                *active_id = fresh.id.clone();
                conversations.push(fresh);
            } else if was_active {
                *active_id = conversations[index.saturating_sub(1)].id.clone();
            }
        });
        true
    }

    /// Appends the user's message (titling the conversation on its first
    /// turn) and returns the snapshot to send to the backend.
    pub fn append_user_turn(&mut self, conversation_id: &str, text: &str) -> Option<Conversation> {
        let index = self.position(conversation_id)?;
        Some(self.transition(|conversations, _| {
            let conversation = &mut conversations[index];
            if conversation.is_empty() {
                conversation.title = title_from_first_message(text);
            }
            let id = conversation.next_message_id(Role::User);
            conversation.messages.push(Message::user(id, text));
            conversation.clone()
        }))
    }

    /// Appends a loading bot placeholder and returns its id.
    pub fn append_bot_placeholder(&mut self, conversation_id: &str) -> Option<String> {
        let index = self.position(conversation_id)?;
        Some(self.transition(|conversations, _| {
            let conversation = &mut conversations[index];
            let id = conversation.next_message_id(Role::Bot);
            conversation.messages.push(Message::bot_placeholder(id.clone()));
            id
        }))
    }

    /// Replaces a bot message's fields in place. Unknown conversation or
    /// message ids are ignored; the conversation may have been deleted while
    /// its reply was in flight.
    pub fn mutate_bot_message(
        &mut self,
        conversation_id: &str,
        message_id: &str,
        content: &str,
        loading: bool,
        error: bool,
    ) -> bool {
        let Some(index) = self.position(conversation_id) else {
            return false;
        };
        let exists = self.conversations[index]
            .message(message_id)
            .is_some_and(Message::is_bot);
        if !exists {
            return false;
        }

        self.transition(|conversations, _| {
            if let Some(message) = conversations[index].message_mut(message_id) {
                message.content = content.to_string();
                message.loading = loading;
                message.error = error;
            }
        });
        true
    }

    pub fn set_thread_id(&mut self, conversation_id: &str, thread_id: &str) -> bool {
        let Some(index) = self.position(conversation_id) else {
            return false;
        };
        if self.conversations[index].thread_id.as_deref() == Some(thread_id) {
            return true;
        }
        self.transition(|conversations, _| {
            conversations[index].thread_id = Some(thread_id.to_string());
        });
        true
    }

    fn transition<F, T>(&mut self, mutator: F) -> T
    where
        F: FnOnce(&mut Vec<Conversation>, &mut String) -> T,
    {
        let mut working = self.conversations.clone();
        let mut active_id = self.active_id.clone();
        let result = mutator(&mut working, &mut active_id);
        self.conversations = working;
        self.active_id = active_id;
        self.persist();
        result
    }

    fn persist(&self) {
        if let Err(err) = save_json(
            self.persistence.as_ref(),
            CONVERSATIONS_KEY,
            &self.conversations,
        ) {
            warn!(error = %err, "failed to persist conversations");
        }
        if let Err(err) = self
            .persistence
            .set(ACTIVE_CONVERSATION_KEY, self.active_id())
        {
            warn!(error = %err, "failed to persist active conversation");
        }
    }
}
