//! Client for the agent endpoint.
//!
//! Every failure mode (transport, non-success status, unusable body) is
//! collapsed into a [`BackendError`] whose `Display` text is what the user
//! sees in the failed bot message.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::api::{GenerateRequest, GenerateResponse};

/// Failure reason used when an error status carries no message of its own.
pub const GENERIC_API_ERROR: &str = "API error";
/// Reply text used when a successful body has no string `response`.
pub const NO_RESPONSE_TEXT: &str = "No response from agent.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request never produced a response (connect, DNS, timeout, ...).
    Transport(String),
    /// The agent reported a failure: a non-success status or an `error` body.
    Status { status: u16, message: String },
    /// A success status whose body was not the expected JSON.
    Malformed(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Transport(message) => write!(f, "{message}"),
            BackendError::Status { message, .. } => write!(f, "{message}"),
            BackendError::Malformed(detail) => {
                write!(f, "Malformed response from agent: {detail}")
            }
        }
    }
}

impl StdError for BackendError {}

/// What one request produced. `thread_id` is reported separately from the
/// result because a failed reply can still carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOutcome {
    pub thread_id: Option<String>,
    pub result: Result<String, BackendError>,
}

impl AgentOutcome {
    pub fn failed(error: BackendError) -> Self {
        Self {
            thread_id: None,
            result: Err(error),
        }
    }
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> AgentOutcome;
}

pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn generate(&self, request: &GenerateRequest) -> AgentOutcome {
        debug!(
            endpoint = %self.endpoint,
            messages = request.contents.len(),
            has_thread = request.thread_id.is_some(),
            "sending agent request"
        );

        let response = match self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return AgentOutcome::failed(BackendError::Transport(err.to_string())),
        };

        let status = response.status();
        match response.text().await {
            Ok(body) => interpret_response(status, &body),
            Err(err) => AgentOutcome::failed(BackendError::Transport(err.to_string())),
        }
    }
}

/// Maps a status and raw body onto an [`AgentOutcome`].
pub fn interpret_response(status: StatusCode, body: &str) -> AgentOutcome {
    let parsed = match serde_json::from_str::<GenerateResponse>(body) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(status = status.as_u16(), error = %err, "unparseable agent body");
            let error = if status.is_success() {
                BackendError::Malformed(err.to_string())
            } else {
                BackendError::Status {
                    status: status.as_u16(),
                    message: GENERIC_API_ERROR.to_string(),
                }
            };
            return AgentOutcome::failed(error);
        }
    };

    let thread_id = parsed.thread_id.clone();

    let result = if !status.is_success() || parsed.error_message().is_some() {
        Err(BackendError::Status {
            status: status.as_u16(),
            message: parsed
                .error_message()
                .unwrap_or(GENERIC_API_ERROR)
                .to_string(),
        })
    } else {
        Ok(parsed
            .response_text()
            .map(str::trim)
            .unwrap_or(NO_RESPONSE_TEXT)
            .to_string())
    };

    AgentOutcome { thread_id, result }
}
