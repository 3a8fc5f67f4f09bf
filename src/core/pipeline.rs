use crate::api::{ApiMessage, GenerateRequest};
use crate::core::backend::ChatBackend;
use crate::core::conversation::Conversation;
use crate::core::message::Message;

/// A request captured at submit time. The ids travel with the request so the
/// reply lands in the conversation that asked, whichever is active later.
#[derive(Debug, Clone)]
pub struct GenerateParams {
    pub conversation: Conversation,
    pub bot_message_id: String,
}

/// Result of one request, addressed to the placeholder it should fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseOutcome {
    pub conversation_id: String,
    pub bot_message_id: String,
    pub thread_id: Option<String>,
    /// Trimmed reply text, or the human-readable failure reason.
    pub result: Result<String, String>,
}

pub fn map_messages(messages: &[Message]) -> Vec<ApiMessage> {
    messages
        .iter()
        .map(|message| ApiMessage {
            role: message.role.to_api_role().to_string(),
            content: message.content.clone(),
        })
        .collect()
}

pub fn build_request(conversation: &Conversation) -> GenerateRequest {
    GenerateRequest {
        contents: map_messages(&conversation.messages),
        thread_id: conversation.thread_id.clone(),
    }
}

/// Issues exactly one request for `params` and reports what came back.
pub async fn generate_response(
    backend: &dyn ChatBackend,
    params: GenerateParams,
) -> ResponseOutcome {
    let GenerateParams {
        conversation,
        bot_message_id,
    } = params;

    let request = build_request(&conversation);
    let outcome = backend.generate(&request).await;

    ResponseOutcome {
        conversation_id: conversation.id,
        bot_message_id,
        thread_id: outcome.thread_id,
        result: outcome.result.map_err(|err| err.to_string()),
    }
}
