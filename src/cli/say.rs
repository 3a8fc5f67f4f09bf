//! TUI-less "say" command

use std::error::Error;
use std::sync::Arc;

use tracing::info;

use crate::core::app::{apply_action, App, AppAction, AppCommand, AppOptions};
use crate::core::backend::{ChatBackend, HttpBackend};
use crate::core::config::Settings;
use crate::core::persistence::KeyValueStore;
use crate::core::pipeline::generate_response;
use crate::core::reveal::RevealMode;

pub async fn run_say(
    prompt: Vec<String>,
    settings: Settings,
    persistence: Arc<dyn KeyValueStore>,
) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: network-chat say <prompt>");
        std::process::exit(1);
    }

    let backend = HttpBackend::new(settings.endpoint.clone(), settings.request_timeout)?;
    let mut app = App::new(
        persistence,
        AppOptions {
            reveal_mode: RevealMode::Instant,
            reveal_interval: settings.reveal_interval,
        },
    );
    info!(endpoint = %backend.endpoint(), "sending one-shot message");

    match say_once(&mut app, &backend, &prompt).await {
        Ok(reply) => {
            println!("{reply}");
            Ok(())
        }
        Err(reason) => {
            eprintln!("❌ {reason}");
            std::process::exit(1);
        }
    }
}

/// Runs a single turn in a fresh conversation and returns the reply, or the
/// failure text the bot message ended up with.
pub async fn say_once(
    app: &mut App,
    backend: &dyn ChatBackend,
    prompt: &str,
) -> Result<String, String> {
    apply_action(app, AppAction::NewConversation);
    let params = match apply_action(
        app,
        AppAction::SubmitMessage {
            text: prompt.to_string(),
        },
    ) {
        Some(AppCommand::GenerateResponse(params)) => params,
        _ => return Err("Nothing to send".to_string()),
    };
    let conversation_id = params.conversation.id.clone();
    let bot_message_id = params.bot_message_id.clone();

    let outcome = generate_response(backend, params).await;
    // Headless sessions always reveal instantly, so no command comes back.
    apply_action(app, AppAction::ResponseReceived(outcome));

    let message = app
        .store
        .get(&conversation_id)
        .and_then(|conversation| conversation.message(&bot_message_id))
        .ok_or_else(|| "Reply was lost".to_string())?;
    if message.error {
        Err(message.content.clone())
    } else {
        Ok(message.content.clone())
    }
}
