use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::reveal::{RevealMode, DEFAULT_REVEAL_INTERVAL};

/// Startup knobs for a chat session, resolved from CLI and config.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub reveal_mode: RevealMode,
    pub reveal_interval: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            reveal_mode: RevealMode::Staged,
            reveal_interval: DEFAULT_REVEAL_INTERVAL,
        }
    }
}

/// The request a session is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub conversation_id: String,
    pub bot_message_id: String,
}

pub struct SessionState {
    pub reveal_mode: RevealMode,
    pub reveal_interval: Duration,
    /// True from submit until the reply is fully revealed or has failed.
    /// Submissions are rejected while it is set.
    pub is_generating: bool,
    /// Only an outcome for this request is applied.
    pub pending_request: Option<PendingRequest>,
    pub current_reveal_id: u64,
    pub reveal_cancel_token: Option<CancellationToken>,
}

impl SessionState {
    pub fn new(options: AppOptions) -> Self {
        Self {
            reveal_mode: options.reveal_mode,
            reveal_interval: options.reveal_interval,
            is_generating: false,
            pending_request: None,
            current_reveal_id: 0,
            reveal_cancel_token: None,
        }
    }

    /// Cancels the running reveal (if any) and returns the id and token for
    /// the next one.
    pub fn begin_reveal(&mut self) -> (u64, CancellationToken) {
        if let Some(token) = self.reveal_cancel_token.take() {
            token.cancel();
        }
        self.current_reveal_id = self.current_reveal_id.wrapping_add(1);
        let token = CancellationToken::new();
        self.reveal_cancel_token = Some(token.clone());
        (self.current_reveal_id, token)
    }

    pub fn finish_generating(&mut self) {
        self.is_generating = false;
        self.reveal_cancel_token = None;
    }
}
