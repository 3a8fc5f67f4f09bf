//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod list;
pub mod say;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::cli::list::list_conversations;
use crate::cli::say::run_say;
use crate::core::config::data::path_display;
use crate::core::config::{Config, Settings, SettingsOverrides};
use crate::core::persistence::{FileStore, KeyValueStore, MemoryStore};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_file_logging, init_stderr_logging};

#[derive(Parser)]
#[command(name = "network-chat")]
#[command(about = "A terminal chat client for a remote agent endpoint")]
#[command(
    long_about = "network-chat is a full-screen terminal client for holding several named \
conversations with an AI agent reachable over HTTP. Conversations and preferences are \
stored locally and replies are revealed word by word.\n\n\
Environment Variables:\n\
  NETWORK_CHAT_ENDPOINT   Agent endpoint (overridden by --endpoint)\n\
  RUST_LOG                Log filter for --log output (default: info)\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt/Shift+Enter   Insert a new line\n\
  Tab               Switch between the prompt and the chat list\n\
  Up/Down           Scroll the transcript, or move through the chat list\n\
  PageUp/PageDown   Scroll the transcript by a page\n\
  Ctrl+N            Start a new chat\n\
  Ctrl+D            Delete the highlighted chat\n\
  Ctrl+T            Toggle light/dark theme\n\
  Esc / Ctrl+C      Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Agent endpoint URL
    #[arg(short = 'e', long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Show replies at once instead of word by word
    #[arg(long, global = true)]
    pub instant: bool,

    /// Write diagnostic logs to the specified file
    #[arg(short = 'l', long, global = true, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Directory holding stored conversations and preferences
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep conversations in memory only; nothing is read or written on disk
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send one message in a new conversation and print the reply
    Say {
        /// The message to send
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// List stored conversations
    List,
    /// Set configuration values (prints the configuration when no value is given)
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            endpoint: self.endpoint.clone(),
            instant_reveal: self.instant,
            data_dir: self.data_dir.clone(),
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let overrides = args.overrides();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            let value = value.map(|parts| parts.join(" ")).unwrap_or_default();
            if value.trim().is_empty() {
                config.print_all();
                return Ok(());
            }
            match config.set_value(&key, &value) {
                Ok(message) => {
                    config.save()?;
                    println!("✅ {message}");
                }
                Err(err) => {
                    eprintln!("❌ {err}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match config.unset_value(&key) {
                Ok(message) => {
                    config.save()?;
                    println!("✅ {message}");
                }
                Err(err) => {
                    eprintln!("❌ {err}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Chat => {
            if let Some(path) = args.log.as_deref() {
                init_file_logging(path)?;
            }
            let settings = Config::load()?.resolve(&overrides);
            let persistence = open_persistence(&settings, args.ephemeral)?;
            run_chat(settings, persistence).await
        }
        Commands::Say { prompt } => {
            init_headless_logging(args.log.as_deref())?;
            let settings = Config::load()?.resolve(&overrides);
            let persistence = open_persistence(&settings, args.ephemeral)?;
            run_say(prompt, settings, persistence).await
        }
        Commands::List => {
            init_headless_logging(args.log.as_deref())?;
            let settings = Config::load()?.resolve(&overrides);
            let persistence = open_persistence(&settings, args.ephemeral)?;
            list_conversations(persistence);
            Ok(())
        }
    }
}

fn init_headless_logging(log: Option<&std::path::Path>) -> Result<(), Box<dyn Error>> {
    match log {
        Some(path) => init_file_logging(path),
        None => init_stderr_logging(),
    }
}

/// Picks the store for this run: memory for `--ephemeral`, otherwise files
/// under the configured (or default) data directory.
pub fn open_persistence(
    settings: &Settings,
    ephemeral: bool,
) -> Result<Arc<dyn KeyValueStore>, Box<dyn Error>> {
    if ephemeral {
        debug!("using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let dir = match &settings.data_dir {
        Some(dir) => dir.clone(),
        None => Config::default_data_dir()?,
    };
    debug!(dir = %path_display(&dir), "using file store");
    Ok(Arc::new(FileStore::new(dir)))
}

#[cfg(test)]
mod tests;
