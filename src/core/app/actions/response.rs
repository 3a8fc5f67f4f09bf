use tracing::debug;

use super::{App, AppAction, AppCommand};
use crate::core::app::session::PendingRequest;
use crate::core::pipeline::{GenerateParams, ResponseOutcome};
use crate::core::reveal::{RevealMessage, RevealMode, RevealParams, RevealUpdate};

pub const BUSY_STATUS: &str = "Still waiting on the previous reply";

pub(super) fn handle_response_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitMessage { text } => submit_message(app, &text),
        AppAction::ResponseReceived(outcome) => response_received(app, outcome),
        AppAction::RevealUpdated(update) => {
            reveal_updated(app, update);
            None
        }
        _ => unreachable!("non-response action routed to response handler"),
    }
}

fn submit_message(app: &mut App, text: &str) -> Option<AppCommand> {
    if app.session.is_generating {
        app.set_status(BUSY_STATUS);
        return None;
    }
    if text.trim().is_empty() {
        return None;
    }

    let conversation_id = app.store.active_id().to_string();
    let conversation = app.store.append_user_turn(&conversation_id, text)?;
    let bot_message_id = app.store.append_bot_placeholder(&conversation_id)?;

    debug!(
        conversation_id = %conversation_id,
        bot_message_id = %bot_message_id,
        turns = conversation.messages.len(),
        "submitting user turn"
    );

    app.session.is_generating = true;
    app.session.pending_request = Some(PendingRequest {
        conversation_id,
        bot_message_id: bot_message_id.clone(),
    });
    app.clear_status();
    app.ui.scroll_to_bottom();
    app.sync_sidebar_to_active();

    Some(AppCommand::GenerateResponse(GenerateParams {
        conversation,
        bot_message_id,
    }))
}

fn response_received(app: &mut App, outcome: ResponseOutcome) -> Option<AppCommand> {
    let ResponseOutcome {
        conversation_id,
        bot_message_id,
        thread_id,
        result,
    } = outcome;

    let awaited = app.session.pending_request.as_ref().is_some_and(|pending| {
        pending.conversation_id == conversation_id && pending.bot_message_id == bot_message_id
    });
    if !awaited {
        debug!(conversation_id = %conversation_id, "ignoring outcome for a request no longer pending");
        return None;
    }
    app.session.pending_request = None;

    // A deleted default conversation comes back under the same id; the
    // placeholder tells the originating conversation apart from its successor.
    let origin_exists = app
        .store
        .get(&conversation_id)
        .is_some_and(|conversation| conversation.message(&bot_message_id).is_some());
    if !origin_exists {
        debug!(conversation_id = %conversation_id, "dropping reply for a deleted conversation");
        app.session.finish_generating();
        return None;
    }
    if let Some(thread_id) = thread_id.as_deref() {
        app.store.set_thread_id(&conversation_id, thread_id);
    }

    let text = match result {
        Ok(text) => text,
        Err(reason) => {
            debug!(conversation_id = %conversation_id, reason = %reason, "request failed");
            app.store
                .mutate_bot_message(&conversation_id, &bot_message_id, &reason, false, true);
            app.session.finish_generating();
            scroll_if_active(app, &conversation_id);
            return None;
        }
    };

    if app.session.reveal_mode == RevealMode::Instant || text.is_empty() {
        app.store
            .mutate_bot_message(&conversation_id, &bot_message_id, &text, false, false);
        app.session.finish_generating();
        scroll_if_active(app, &conversation_id);
        return None;
    }

    let (reveal_id, cancel_token) = app.session.begin_reveal();
    debug!(reveal_id, conversation_id = %conversation_id, "starting staged reveal");
    Some(AppCommand::StartReveal(RevealParams {
        reveal_id,
        conversation_id,
        message_id: bot_message_id,
        text,
        interval: app.session.reveal_interval,
        cancel_token,
    }))
}

fn reveal_updated(app: &mut App, update: RevealUpdate) {
    let RevealUpdate {
        reveal_id,
        conversation_id,
        message_id,
        message,
    } = update;

    match message {
        RevealMessage::Progress(text) => {
            app.store
                .mutate_bot_message(&conversation_id, &message_id, &text, true, false);
        }
        RevealMessage::Finished(text) => {
            app.store
                .mutate_bot_message(&conversation_id, &message_id, &text, false, false);
            if reveal_id == app.session.current_reveal_id {
                app.session.finish_generating();
            }
        }
    }
    scroll_if_active(app, &conversation_id);
}

fn scroll_if_active(app: &mut App, conversation_id: &str) {
    if app.store.active_id() == conversation_id {
        app.ui.scroll_to_bottom();
    }
}
