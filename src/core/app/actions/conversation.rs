use tracing::debug;

use super::{App, AppAction, AppCommand};

pub(super) fn handle_conversation_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SelectConversation { id } => {
            if app.store.select_conversation(&id) {
                app.ui.scroll_to_bottom();
            }
            app.sync_sidebar_to_active();
            None
        }
        AppAction::NewConversation => {
            let id = app.store.create_conversation();
            debug!(conversation_id = %id, "created conversation");
            app.ui.scroll_to_bottom();
            app.ui.focus_input();
            app.sync_sidebar_to_active();
            None
        }
        AppAction::DeleteConversation { id } => {
            if app.store.delete_conversation(&id) {
                debug!(conversation_id = %id, "deleted conversation");
                app.ui.scroll_to_bottom();
            }
            app.sync_sidebar_to_active();
            None
        }
        AppAction::ToggleTheme => {
            app.theme = app.theme.toggled();
            app.theme.save(app.persistence());
            None
        }
        _ => unreachable!("non-conversation action routed to conversation handler"),
    }
}
