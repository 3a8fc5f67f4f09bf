use std::sync::Arc;

use crate::core::persistence::KeyValueStore;
use crate::core::store::ConversationStore;

pub fn list_conversations(persistence: Arc<dyn KeyValueStore>) {
    let store = ConversationStore::load(persistence);
    println!("Conversations:");
    for line in conversation_lines(&store) {
        println!("{line}");
    }
}

/// One line per conversation; the active one is marked with `*`.
pub fn conversation_lines(store: &ConversationStore) -> Vec<String> {
    store
        .conversations()
        .iter()
        .map(|conversation| {
            let marker = if conversation.id == store.active_id() {
                "*"
            } else {
                " "
            };
            let count = conversation.messages.len();
            let noun = if count == 1 { "message" } else { "messages" };
            format!(
                "  {marker} {} [{}] ({count} {noun})",
                conversation.title.replace('\n', " "),
                conversation.id
            )
        })
        .collect()
}
