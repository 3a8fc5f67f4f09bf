//! network-chat is a terminal client for holding several named conversations
//! with a remote agent backend.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation model, the persisted conversation store,
//!   the response pipeline and the staged reveal, and the [`core::app::App`]
//!   controller that applies user intents to them.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that turns key presses into actions and executes their side effects.
//! - [`api`] defines the request/response payloads exchanged with the backend.
//! - [`cli`] parses arguments and dispatches into the chat loop or one of the
//!   headless subcommands.
//!
//! The binary (`src/main.rs`) only forwards to [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
