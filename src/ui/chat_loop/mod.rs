//! Interactive chat session.
//!
//! [`run_chat`] builds the backend and the [`App`], takes over the terminal,
//! and hands control to the event loop until the user quits.

mod event_loop;
mod keybindings;
mod lifecycle;

use std::{error::Error, sync::Arc};

use tracing::info;

use crate::core::app::{App, AppOptions};
use crate::core::backend::HttpBackend;
use crate::core::config::Settings;
use crate::core::persistence::KeyValueStore;

use self::event_loop::run_event_loop;
use self::lifecycle::{restore_terminal, setup_terminal};

pub async fn run_chat(
    settings: Settings,
    persistence: Arc<dyn KeyValueStore>,
) -> Result<(), Box<dyn Error>> {
    let backend = HttpBackend::new(settings.endpoint.clone(), settings.request_timeout)?;
    let mut app = App::new(
        persistence,
        AppOptions {
            reveal_mode: settings.reveal_mode,
            reveal_interval: settings.reveal_interval,
        },
    );
    info!(
        endpoint = %backend.endpoint(),
        reveal = settings.reveal_mode.as_str(),
        conversations = app.store.conversations().len(),
        "starting chat session"
    );

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, Arc::new(backend)).await;
    restore_terminal(&mut terminal)?;

    info!("chat session ended");
    result
}
