use serde::{Deserialize, Serialize};

/// Text shown in a bot placeholder until the reply (or an error) replaces it.
pub const PLACEHOLDER_CONTENT: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }

    /// Role name the agent backend expects.
    pub fn to_api_role(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "assistant",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Role::User),
            // Older transcripts may carry the API spelling.
            "bot" | "assistant" => Ok(Role::Bot),
            _ => Err(format!("invalid message role: {value}")),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub loading: bool,
    #[serde(default)]
    pub error: bool,
}

impl Message {
    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            content: content.into(),
            loading: false,
            error: false,
        }
    }

    pub fn bot_placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Bot,
            content: PLACEHOLDER_CONTENT.to_string(),
            loading: true,
            error: false,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_bot(&self) -> bool {
        self.role == Role::Bot
    }
}

/// Builds a message id stamped with the creation time, e.g. `bot-1718000000000`.
pub fn stamped_id(prefix: &str) -> String {
    format!("{prefix}-{}", chrono::Utc::now().timestamp_millis())
}
