#[cfg(test)]
use crate::api::GenerateRequest;
#[cfg(test)]
use crate::core::app::{App, AppOptions};
#[cfg(test)]
use crate::core::backend::{AgentOutcome, BackendError, ChatBackend};
#[cfg(test)]
use crate::core::persistence::MemoryStore;
#[cfg(test)]
use crate::core::reveal::RevealMode;
#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use std::sync::{Arc, Mutex};

#[cfg(test)]
pub fn test_options(reveal_mode: RevealMode) -> AppOptions {
    AppOptions {
        reveal_mode,
        reveal_interval: std::time::Duration::from_millis(1),
    }
}

#[cfg(test)]
pub fn create_test_app() -> App {
    App::new(Arc::new(MemoryStore::new()), test_options(RevealMode::Staged))
}

#[cfg(test)]
pub fn create_instant_test_app() -> App {
    App::new(Arc::new(MemoryStore::new()), test_options(RevealMode::Instant))
}

/// Backend that replays canned outcomes in order and records every request.
#[cfg(test)]
pub struct ScriptedBackend {
    outcomes: Mutex<VecDeque<AgentOutcome>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

#[cfg(test)]
impl ScriptedBackend {
    pub fn new(outcomes: impl IntoIterator<Item = AgentOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl ChatBackend for ScriptedBackend {
    async fn generate(&self, request: &GenerateRequest) -> AgentOutcome {
        self.requests.lock().unwrap().push(request.clone());
        self.outcomes.lock().unwrap().pop_front().unwrap_or_else(|| {
            AgentOutcome::failed(BackendError::Transport(
                "no scripted outcome left".to_string(),
            ))
        })
    }
}
