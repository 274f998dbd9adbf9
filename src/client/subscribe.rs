use std::sync::{Arc, Mutex};

use crate::{dispatch::NEW_MESSAGE, models::Message};

use super::{Socket, store::ChatStore};

/// Attach the push listener for the active conversation.
///
/// Idempotent: any listener registered earlier is removed first, so calling
/// this on every conversation switch leaves exactly one handler firing per
/// incoming push. No-op without a selected conversation or a live socket.
pub fn subscribe_to_messages(state: &Arc<Mutex<ChatStore>>, socket: Option<&Socket>) {
    if state
        .lock()
        .expect("chat store poisoned")
        .selected_user
        .is_none()
    {
        return;
    }
    let Some(socket) = socket else {
        return;
    };

    socket.off(NEW_MESSAGE);

    let state = Arc::clone(state);
    socket.on(
        NEW_MESSAGE,
        Box::new(move |payload| {
            let Ok(message) = serde_json::from_value::<Message>(payload) else {
                return;
            };
            state
                .lock()
                .expect("chat store poisoned")
                .receive_push(message);
        }),
    );
}

/// Detach the push listener; safe with no socket and with nothing attached.
pub fn unsubscribe_from_messages(socket: Option<&Socket>) {
    if let Some(socket) = socket {
        socket.off(NEW_MESSAGE);
    }
}
