pub mod http;
pub mod socket;
pub mod store;
pub mod subscribe;

pub use socket::Socket;
pub use store::{ChatClient, ChatStore};

use uuid::Uuid;

use crate::models::{Message, MessageDraft, User};

/// Ceiling on the estimated decoded size of an outgoing image.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// The REST surface the client consumes.
pub trait ChatApi {
    async fn fetch_users(&self) -> anyhow::Result<Vec<User>>;
    async fn fetch_messages(&self, user_id: Uuid) -> anyhow::Result<Vec<Message>>;
    async fn send_message(&self, receiver_id: Uuid, draft: &MessageDraft)
    -> anyhow::Result<Message>;
}

/// User-visible failure channel (the toast of the original UI).
pub trait Notifier {
    fn error(&self, message: &str);
}

/// Headless notifier: failures go to the log and nowhere else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("image size should be less than 5MB")]
    ImageTooLarge,
    #[error("no conversation selected")]
    NoConversation,
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}
