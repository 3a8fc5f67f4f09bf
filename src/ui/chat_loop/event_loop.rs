//! Event polling, dispatching, and UI rendering loop.
//!
//! The loop owns the [`App`] outright. Terminal input, finished requests and
//! reveal ticks all arrive on channels and are turned into [`AppAction`]s;
//! whatever commands those actions return are executed here by spawning
//! Tokio tasks that report back through the same channels.

use std::{error::Error, sync::Arc, time::Duration};

use ratatui::crossterm::event::{self, Event};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::core::app::{apply_actions, App, AppAction, AppActionDispatcher, AppCommand};
use crate::core::backend::ChatBackend;
use crate::core::pipeline::{generate_response, GenerateParams};
use crate::core::reveal::RevealService;
use crate::ui::renderer::ui;

use super::keybindings::{handle_key, handle_paste};
use super::lifecycle::ChatTerminal;

const STATUS_TTL: Duration = Duration::from_secs(4);
const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

/// Runs one request in the background and reports its outcome as an action.
fn spawn_generate(
    backend: Arc<dyn ChatBackend>,
    dispatcher: AppActionDispatcher,
    params: GenerateParams,
) {
    tokio::spawn(async move {
        let outcome = generate_response(backend.as_ref(), params).await;
        debug!(
            conversation_id = %outcome.conversation_id,
            ok = outcome.result.is_ok(),
            "agent request finished"
        );
        dispatcher.dispatch(AppAction::ResponseReceived(outcome));
    });
}

fn execute_commands(
    commands: Vec<AppCommand>,
    backend: &Arc<dyn ChatBackend>,
    dispatcher: &AppActionDispatcher,
    reveal_service: &RevealService,
) {
    for cmd in commands {
        match cmd {
            AppCommand::GenerateResponse(params) => {
                spawn_generate(backend.clone(), dispatcher.clone(), params);
            }
            AppCommand::StartReveal(params) => {
                reveal_service.spawn_reveal(params);
            }
        }
    }
}

fn handle_ui_event(app: &mut App, event: UiEvent) -> Vec<AppAction> {
    match event {
        UiEvent::Crossterm(Event::Key(key)) => handle_key(app, key),
        UiEvent::Crossterm(Event::Paste(text)) => {
            handle_paste(app, &text);
            Vec::new()
        }
        // Resizes and focus changes only need the redraw every pass performs.
        UiEvent::Crossterm(_) => Vec::new(),
    }
}

fn expire_status(app: &mut App) {
    if app
        .ui
        .status_set_at
        .is_some_and(|set_at| set_at.elapsed() >= STATUS_TTL)
    {
        app.clear_status();
    }
}

pub async fn run_event_loop(
    terminal: &mut ChatTerminal,
    app: &mut App,
    backend: Arc<dyn ChatBackend>,
) -> Result<(), Box<dyn Error>> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let dispatcher = AppActionDispatcher::new(action_tx);
    let (reveal_service, mut reveal_rx) = RevealService::new();

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let result = loop {
        if let Err(err) = terminal.draw(|f| ui(f, app)) {
            break Err(err.into());
        }
        if app.ui.exit_requested {
            break Ok(());
        }

        let actions = tokio::select! {
            Some(event) = event_rx.recv() => handle_ui_event(app, event),
            Some(action) = action_rx.recv() => vec![action],
            Some(update) = reveal_rx.recv() => vec![AppAction::RevealUpdated(update)],
            _ = ticker.tick() => {
                expire_status(app);
                Vec::new()
            }
        };

        let commands = apply_actions(app, actions);
        execute_commands(commands, &backend, &dispatcher, &reveal_service);
    };

    event_reader_handle.abort();
    if let Some(token) = app.session.reveal_cancel_token.take() {
        token.cancel();
    }
    result
}
