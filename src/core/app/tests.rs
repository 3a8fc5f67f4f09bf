use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::core::conversation::{Conversation, DEFAULT_CONVERSATION_ID, DEFAULT_TITLE};
use crate::core::message::{Message, PLACEHOLDER_CONTENT};
use crate::core::persistence::{
    load_json_or, save_json, KeyValueStore, MemoryStore, ACTIVE_CONVERSATION_KEY,
    CONVERSATIONS_KEY, THEME_KEY,
};
use crate::core::pipeline::{GenerateParams, ResponseOutcome};
use crate::core::preferences::ThemeMode;
use crate::core::reveal::{RevealMessage, RevealParams, RevealService, RevealUpdate};
use crate::utils::test_utils::{create_instant_test_app, create_test_app};

fn submit(app: &mut App, text: &str) -> GenerateParams {
    match apply_action(
        app,
        AppAction::SubmitMessage {
            text: text.to_string(),
        },
    ) {
        Some(AppCommand::GenerateResponse(params)) => params,
        _ => panic!("expected a generate command"),
    }
}

fn success(params: &GenerateParams, thread_id: Option<&str>, text: &str) -> AppAction {
    AppAction::ResponseReceived(ResponseOutcome {
        conversation_id: params.conversation.id.clone(),
        bot_message_id: params.bot_message_id.clone(),
        thread_id: thread_id.map(str::to_string),
        result: Ok(text.to_string()),
    })
}

fn finished(params: &RevealParams) -> AppAction {
    AppAction::RevealUpdated(RevealUpdate {
        reveal_id: params.reveal_id,
        conversation_id: params.conversation_id.clone(),
        message_id: params.message_id.clone(),
        message: RevealMessage::Finished(params.text.clone()),
    })
}

fn expect_reveal(command: Option<AppCommand>) -> RevealParams {
    match command {
        Some(AppCommand::StartReveal(params)) => params,
        _ => panic!("expected a reveal command"),
    }
}

fn last_message<'a>(app: &'a App, conversation_id: &str) -> &'a Message {
    app.store
        .get(conversation_id)
        .and_then(|c| c.messages.last())
        .expect("conversation has messages")
}

#[test]
fn first_submit_titles_conversation_and_adds_placeholder() {
    let mut app = create_test_app();
    let params = submit(&mut app, "Hello");

    let active = app.store.active();
    assert_eq!(active.title, "Hello");
    assert_eq!(active.messages.len(), 2);
    assert!(active.messages[0].is_user());
    assert_eq!(active.messages[0].content, "Hello");

    let placeholder = &active.messages[1];
    assert!(placeholder.is_bot());
    assert_eq!(placeholder.content, PLACEHOLDER_CONTENT);
    assert!(placeholder.loading);
    assert!(!placeholder.error);

    // The request snapshot holds the user turn but not the placeholder.
    assert_eq!(params.conversation.messages.len(), 1);
    assert_eq!(params.bot_message_id, placeholder.id);
    assert!(app.session.is_generating);
}

#[test]
fn long_first_message_is_truncated_for_the_title() {
    let mut app = create_test_app();
    submit(&mut app, "Tell me everything about the history of Rome");
    assert_eq!(app.store.active().title, "Tell me everything about ...");
}

#[test]
fn blank_input_is_ignored() {
    let mut app = create_test_app();
    let command = apply_action(
        &mut app,
        AppAction::SubmitMessage {
            text: "   \n ".to_string(),
        },
    );
    assert!(command.is_none());
    assert!(app.store.active().messages.is_empty());
    assert!(!app.session.is_generating);
}

#[test]
fn staged_reply_is_revealed_and_thread_recorded() {
    let mut app = create_test_app();
    let params = submit(&mut app, "Hello");
    let conversation_id = params.conversation.id.clone();

    let reveal = expect_reveal(apply_action(&mut app, success(&params, Some("t1"), "Hi there")));
    assert_eq!(
        app.store.get(&conversation_id).and_then(|c| c.thread_id.as_deref()),
        Some("t1")
    );
    assert!(app.session.is_generating);

    apply_action(
        &mut app,
        AppAction::RevealUpdated(RevealUpdate {
            reveal_id: reveal.reveal_id,
            conversation_id: conversation_id.clone(),
            message_id: reveal.message_id.clone(),
            message: RevealMessage::Progress("Hi".to_string()),
        }),
    );
    let partial = last_message(&app, &conversation_id);
    assert_eq!(partial.content, "Hi");
    assert!(partial.loading);

    apply_action(&mut app, finished(&reveal));
    let reply = last_message(&app, &conversation_id);
    assert_eq!(reply.content, "Hi there");
    assert!(!reply.loading);
    assert!(!reply.error);
    assert!(!app.session.is_generating);
}

#[test]
fn follow_up_request_carries_thread_id() {
    let mut app = create_instant_test_app();
    let params = submit(&mut app, "Hello");
    apply_action(&mut app, success(&params, Some("t1"), "Hi there"));

    let follow_up = submit(&mut app, "And then?");
    assert_eq!(follow_up.conversation.thread_id.as_deref(), Some("t1"));
    assert_eq!(follow_up.conversation.messages.len(), 3);
}

#[test]
fn failed_request_marks_placeholder_as_error() {
    let mut app = create_test_app();
    let params = submit(&mut app, "Hello");

    let command = apply_action(
        &mut app,
        AppAction::ResponseReceived(ResponseOutcome {
            conversation_id: params.conversation.id.clone(),
            bot_message_id: params.bot_message_id.clone(),
            thread_id: None,
            result: Err("overloaded".to_string()),
        }),
    );
    assert!(command.is_none());

    let reply = last_message(&app, &params.conversation.id);
    assert_eq!(reply.content, "overloaded");
    assert!(reply.error);
    assert!(!reply.loading);
    assert!(!app.session.is_generating);
}

#[test]
fn submit_is_rejected_while_generating() {
    let mut app = create_test_app();
    submit(&mut app, "Hello");

    let command = apply_action(
        &mut app,
        AppAction::SubmitMessage {
            text: "again".to_string(),
        },
    );
    assert!(command.is_none());
    assert_eq!(app.store.active().messages.len(), 2);
    assert!(app.ui.status.is_some());
}

#[test]
fn reply_lands_in_originating_conversation_after_switch() {
    let mut app = create_instant_test_app();
    let params = submit(&mut app, "Question for A");
    let conversation_a = params.conversation.id.clone();

    apply_action(&mut app, AppAction::NewConversation);
    let conversation_b = app.store.active_id().to_string();
    assert_ne!(conversation_a, conversation_b);

    apply_action(&mut app, success(&params, Some("ta"), "Answer for A"));

    let reply = last_message(&app, &conversation_a);
    assert_eq!(reply.content, "Answer for A");
    assert!(!reply.loading);
    let b = app.store.get(&conversation_b).expect("conversation b");
    assert!(b.messages.is_empty());
    assert_eq!(b.thread_id, None);
    assert_eq!(app.store.active_id(), conversation_b);
}

#[test]
fn reply_for_deleted_conversation_is_dropped() {
    let mut app = create_instant_test_app();
    let params = submit(&mut app, "Hello");
    apply_action(
        &mut app,
        AppAction::DeleteConversation {
            id: params.conversation.id.clone(),
        },
    );

    apply_action(&mut app, success(&params, Some("t1"), "Hi"));
    assert!(!app.session.is_generating);
    assert_eq!(app.store.conversations().len(), 1);
    assert!(app.store.active().messages.is_empty());
    assert_eq!(app.store.active().thread_id, None);
}

#[test]
fn staged_reply_for_deleted_conversation_releases_submit() {
    let mut app = create_test_app();
    let params = submit(&mut app, "Hello");
    apply_action(
        &mut app,
        AppAction::DeleteConversation {
            id: params.conversation.id.clone(),
        },
    );

    let long_reply = vec!["word"; 500].join(" ");
    let command = apply_action(&mut app, success(&params, Some("t1"), &long_reply));
    assert!(command.is_none());
    assert!(!app.session.is_generating);
    assert!(app.session.reveal_cancel_token.is_none());
    assert!(app.store.active().messages.is_empty());

    let next = apply_action(
        &mut app,
        AppAction::SubmitMessage {
            text: "Still there?".to_string(),
        },
    );
    assert!(matches!(next, Some(AppCommand::GenerateResponse(_))));
}

#[test]
fn outcome_for_settled_request_is_ignored() {
    let mut app = create_instant_test_app();
    let params = submit(&mut app, "Hello");
    apply_action(&mut app, success(&params, Some("t1"), "Hi there"));

    let command = apply_action(&mut app, success(&params, Some("t9"), "late duplicate"));
    assert!(command.is_none());
    assert_eq!(last_message(&app, &params.conversation.id).content, "Hi there");
    assert_eq!(app.store.active().thread_id.as_deref(), Some("t1"));
}

#[test]
fn thread_id_survives_reply_without_one() {
    let mut app = create_instant_test_app();
    let params = submit(&mut app, "Hello");
    apply_action(&mut app, success(&params, Some("t1"), "Hi there"));

    let follow_up = submit(&mut app, "And then?");
    apply_action(&mut app, success(&follow_up, None, "Then this"));
    assert_eq!(app.store.active().thread_id.as_deref(), Some("t1"));
}

#[test]
fn user_text_is_stored_verbatim() {
    let mut app = create_instant_test_app();
    let params = submit(&mut app, "  Hello there \n");

    let conversation = app.store.get(&params.conversation.id).expect("conversation");
    assert_eq!(conversation.title, "  Hello there \n");
    assert_eq!(conversation.messages[0].content, "  Hello there \n");
    assert_eq!(params.conversation.messages[0].content, "  Hello there \n");
}

#[test]
fn stale_reveal_does_not_clear_generating() {
    let mut app = create_test_app();
    let params = submit(&mut app, "Hello");
    let first = expect_reveal(apply_action(&mut app, success(&params, None, "first reply")));

    // A second reveal supersedes the first one.
    let (second_id, _token) = app.session.begin_reveal();
    assert!(first.cancel_token.is_cancelled());
    app.session.is_generating = true;

    apply_action(&mut app, finished(&first));
    let reply = last_message(&app, &params.conversation.id);
    assert_eq!(reply.content, "first reply");
    assert!(!reply.loading);
    assert!(app.session.is_generating);
    assert_eq!(app.session.current_reveal_id, second_id);
}

#[test]
fn instant_mode_finishes_without_reveal() {
    let mut app = create_instant_test_app();
    let params = submit(&mut app, "Hello");
    let command = apply_action(&mut app, success(&params, None, "Hi there"));
    assert!(command.is_none());

    let reply = last_message(&app, &params.conversation.id);
    assert_eq!(reply.content, "Hi there");
    assert!(!reply.loading);
    assert!(!app.session.is_generating);
}

#[test]
fn empty_reply_is_revealed_instantly() {
    let mut app = create_test_app();
    let params = submit(&mut app, "Hello");
    let command = apply_action(&mut app, success(&params, None, ""));
    assert!(command.is_none());
    assert!(!last_message(&app, &params.conversation.id).loading);
    assert!(!app.session.is_generating);
}

#[test]
fn deleting_sole_conversation_restores_default() {
    let store = Arc::new(MemoryStore::new());
    let mut c1 = Conversation::new("c1");
    c1.title = "Old chat".to_string();
    c1.messages.push(Message::user("user-1", "hi"));
    save_json(store.as_ref(), CONVERSATIONS_KEY, &vec![c1]).expect("seed");
    store.set(ACTIVE_CONVERSATION_KEY, "c1").expect("seed");

    let mut app = App::new(store.clone(), AppOptions::default());
    assert_eq!(app.store.active_id(), "c1");

    apply_action(&mut app, AppAction::DeleteConversation { id: "c1".into() });

    assert_eq!(app.store.conversations().len(), 1);
    assert_eq!(app.store.active_id(), DEFAULT_CONVERSATION_ID);
    assert_eq!(app.store.active().title, DEFAULT_TITLE);
    assert_eq!(app.ui.sidebar_index, 0);

    let persisted: Vec<Conversation> = load_json_or(store.as_ref(), CONVERSATIONS_KEY, Vec::new);
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id, DEFAULT_CONVERSATION_ID);
    assert_eq!(
        store.get(ACTIVE_CONVERSATION_KEY).as_deref(),
        Some(DEFAULT_CONVERSATION_ID)
    );
}

#[test]
fn select_moves_sidebar_and_ignores_unknown_ids() {
    let mut app = create_test_app();
    submit(&mut app, "Hello");
    app.session.finish_generating();
    apply_action(&mut app, AppAction::NewConversation);
    assert_eq!(app.ui.sidebar_index, 0);

    let older = app.store.conversations()[1].id.clone();
    apply_action(&mut app, AppAction::SelectConversation { id: older.clone() });
    assert_eq!(app.store.active_id(), older);
    assert_eq!(app.ui.sidebar_index, 1);

    apply_action(
        &mut app,
        AppAction::SelectConversation {
            id: "missing".into(),
        },
    );
    assert_eq!(app.store.active_id(), older);
}

#[test]
fn toggle_theme_persists_preference() {
    let store = Arc::new(MemoryStore::new());
    store.set(THEME_KEY, "dark").expect("seed");
    let mut app = App::new(store.clone(), AppOptions::default());
    assert_eq!(app.theme, ThemeMode::Dark);

    apply_action(&mut app, AppAction::ToggleTheme);
    assert_eq!(app.theme, ThemeMode::Light);
    assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
}

#[test]
fn dispatcher_delivers_actions_in_order() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let dispatcher = AppActionDispatcher::new(tx);
    dispatcher.dispatch_many([AppAction::NewConversation, AppAction::ToggleTheme]);

    assert!(matches!(rx.try_recv(), Ok(AppAction::NewConversation)));
    assert!(matches!(rx.try_recv(), Ok(AppAction::ToggleTheme)));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn reveal_task_drives_placeholder_to_full_text() {
    let mut app = create_test_app();
    let params = submit(&mut app, "Hello");
    let reveal = expect_reveal(apply_action(
        &mut app,
        success(&params, None, "one  two\nthree"),
    ));

    let (service, mut rx) = RevealService::new();
    service.spawn_reveal(reveal);

    let mut progress = Vec::new();
    while app.session.is_generating {
        let update = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("reveal update in time")
            .expect("channel open");
        if let RevealMessage::Progress(text) = &update.message {
            progress.push(text.clone());
        }
        apply_actions(&mut app, [AppAction::RevealUpdated(update)]);
    }

    assert_eq!(progress, ["one", "one two", "one two three"]);
    let reply = last_message(&app, &params.conversation.id);
    assert_eq!(reply.content, "one  two\nthree");
    assert!(!reply.loading);
}
