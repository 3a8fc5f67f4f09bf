//! Application controller.
//!
//! [`App`] owns the conversation store, the theme preference, the session
//! flags and the UI state. Nothing outside this module mutates the store:
//! user intents and background results arrive as [`AppAction`]s and are
//! applied by [`apply_action`], which may hand back an [`AppCommand`] for the
//! event loop to execute.

use std::sync::Arc;

use crate::core::persistence::KeyValueStore;
use crate::core::preferences::ThemeMode;
use crate::core::store::ConversationStore;

pub mod actions;
pub mod session;
pub mod ui_state;

pub use actions::{apply_action, apply_actions, AppAction, AppActionDispatcher, AppCommand};
pub use session::{AppOptions, SessionState};
pub use ui_state::{Focus, UiState};

pub struct App {
    pub store: ConversationStore,
    pub theme: ThemeMode,
    pub session: SessionState,
    pub ui: UiState,
    persistence: Arc<dyn KeyValueStore>,
}

impl App {
    pub fn new(persistence: Arc<dyn KeyValueStore>, options: AppOptions) -> Self {
        let store = ConversationStore::load(persistence.clone());
        let theme = ThemeMode::load(persistence.as_ref());
        let mut app = Self {
            store,
            theme,
            session: SessionState::new(options),
            ui: UiState::new(),
            persistence,
        };
        app.sync_sidebar_to_active();
        app
    }

    pub fn persistence(&self) -> &dyn KeyValueStore {
        self.persistence.as_ref()
    }

    /// Moves the sidebar highlight onto the active conversation.
    pub fn sync_sidebar_to_active(&mut self) {
        let active_id = self.store.active_id().to_string();
        self.ui.sidebar_index = self.store.position(&active_id).unwrap_or(0);
    }

    /// Conversation under the sidebar highlight.
    pub fn highlighted_conversation_id(&self) -> Option<&str> {
        self.store
            .conversations()
            .get(self.ui.sidebar_index)
            .map(|conversation| conversation.id.as_str())
    }

    pub fn set_status<S: Into<String>>(&mut self, status: S) {
        self.ui.set_status(status);
    }

    pub fn clear_status(&mut self) {
        self.ui.clear_status();
    }
}

#[cfg(test)]
mod tests;
