use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct GenerateRequest {
    pub contents: Vec<ApiMessage>,
    pub thread_id: Option<String>,
}

/// Body returned by the agent endpoint.
///
/// Every field is optional so that error bodies (which usually carry only
/// `error`) still deserialize and can donate their `thread_id`.
#[derive(Debug, Deserialize, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: Option<serde_json::Value>,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl GenerateResponse {
    /// Text of the `response` field when it is a string.
    pub fn response_text(&self) -> Option<&str> {
        self.response.as_ref().and_then(|value| value.as_str())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|error| error.message.as_deref())
            .filter(|message| !message.trim().is_empty())
    }
}
