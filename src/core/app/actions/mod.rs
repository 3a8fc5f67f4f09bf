mod conversation;
mod response;

use tokio::sync::mpsc;

use super::App;
use crate::core::pipeline::{GenerateParams, ResponseOutcome};
use crate::core::reveal::{RevealParams, RevealUpdate};

#[derive(Debug, Clone)]
pub enum AppAction {
    SubmitMessage { text: String },
    SelectConversation { id: String },
    NewConversation,
    DeleteConversation { id: String },
    ToggleTheme,
    ResponseReceived(ResponseOutcome),
    RevealUpdated(RevealUpdate),
}

/// Side effects the event loop performs on the controller's behalf.
pub enum AppCommand {
    GenerateResponse(GenerateParams),
    StartReveal(RevealParams),
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppAction>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppAction>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction) {
        let _ = self.tx.send(action);
    }

    pub fn dispatch_many<I>(&self, actions: I)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            self.dispatch(action);
        }
    }
}

pub fn apply_actions(app: &mut App, actions: impl IntoIterator<Item = AppAction>) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitMessage { .. }
        | AppAction::ResponseReceived(_)
        | AppAction::RevealUpdated(_) => response::handle_response_action(app, action),

        AppAction::SelectConversation { .. }
        | AppAction::NewConversation
        | AppAction::DeleteConversation { .. }
        | AppAction::ToggleTheme => conversation::handle_conversation_action(app, action),
    }
}
