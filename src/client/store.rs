use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::models::{Message, MessageDraft, User};

use super::{ChatApi, ClientError, MAX_IMAGE_BYTES, Notifier};

/// Observable conversation state.
///
/// Single writer: every mutation happens on a response or push callback, and
/// each one replaces whole values so a UI read never sees a half-applied edit.
#[derive(Debug, Default)]
pub struct ChatStore {
    pub users: Vec<User>,
    pub messages: Vec<Message>,
    pub selected_user: Option<User>,
    pub users_loading: bool,
    pub messages_loading: bool,
}

impl ChatStore {
    pub fn set_selected_user(&mut self, user: Option<User>) {
        self.selected_user = user;
    }

    /// Route a pushed message into the local sequence.
    ///
    /// Pushes for other conversations are dropped, and a message already
    /// present (our own send racing its echoed push) is never appended twice.
    pub fn receive_push(&mut self, message: Message) {
        let Some(selected) = &self.selected_user else {
            return;
        };
        if message.sender_id != selected.id && message.receiver_id != selected.id {
            return;
        }
        if self.messages.iter().any(|m| m.id == message.id) {
            return;
        }
        self.messages.push(message);
    }
}

/// Fetch/send orchestration over a shared [`ChatStore`].
///
/// Loading flags are cleared on every path, upstream failures become
/// notifications, and only `send_message` re-raises so the caller can keep
/// its draft.
pub struct ChatClient<A, N> {
    state: Arc<Mutex<ChatStore>>,
    api: A,
    notifier: N,
}

impl<A: ChatApi, N: Notifier> ChatClient<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            state: Arc::new(Mutex::new(ChatStore::default())),
            api,
            notifier,
        }
    }

    /// Shared handle for subscription handlers and UI reads.
    pub fn state(&self) -> Arc<Mutex<ChatStore>> {
        Arc::clone(&self.state)
    }

    pub fn select_user(&self, user: Option<User>) {
        self.lock().set_selected_user(user);
    }

    fn lock(&self) -> MutexGuard<'_, ChatStore> {
        self.state.lock().expect("chat store poisoned")
    }

    pub async fn load_users(&self) {
        self.lock().users_loading = true;
        let fetched = self.api.fetch_users().await;

        let mut state = self.lock();
        state.users_loading = false;
        match fetched {
            Ok(users) => state.users = users,
            Err(err) => {
                drop(state);
                self.notifier.error(&err.to_string());
            }
        }
    }

    /// Full resync of the active conversation; the server is the source of
    /// truth at fetch time, so the sequence is replaced wholesale.
    pub async fn load_messages(&self, user_id: Uuid) {
        self.lock().messages_loading = true;
        let fetched = self.api.fetch_messages(user_id).await;

        let mut state = self.lock();
        state.messages_loading = false;
        match fetched {
            Ok(messages) => state.messages = messages,
            Err(err) => {
                drop(state);
                self.notifier.error(&err.to_string());
            }
        }
    }

    /// Send to the selected conversation. On success the canonical record is
    /// appended locally, so the sender's own message needs no refetch.
    pub async fn send_message(&self, draft: MessageDraft) -> Result<(), ClientError> {
        let receiver_id = match self.lock().selected_user.as_ref() {
            Some(user) => user.id,
            None => {
                self.notifier.error("no conversation selected");
                return Err(ClientError::NoConversation);
            }
        };

        if let Some(image) = &draft.image {
            // base64 decodes to ~3/4 of its length; checked before any round trip
            if image.len() / 4 * 3 > MAX_IMAGE_BYTES {
                self.notifier.error("image size should be less than 5MB");
                return Err(ClientError::ImageTooLarge);
            }
        }

        match self.api.send_message(receiver_id, &draft).await {
            Ok(message) => {
                self.lock().messages.push(message);
                Ok(())
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                Err(ClientError::Upstream(err))
            }
        }
    }
}
