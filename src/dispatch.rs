use serde::{Deserialize, Serialize};

use crate::{models::Message, registry::Registry};

/// Push event name as it appears on the wire.
pub const NEW_MESSAGE: &str = "newMessage";

/// Server → client push envelope: `{"type": "...", "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerEvent {
    #[serde(rename = "newMessage")]
    NewMessage(Message),
}

/// Fan a stored message out to its receiver, if connected.
///
/// Fire-and-forget: the message is already persisted, so an offline receiver or
/// a connection that closed under us never fails the originating send.
pub fn dispatch(registry: &Registry, message: &Message) {
    let Some(handle) = registry.lookup(message.receiver_id) else {
        // receiver offline; they pick the message up on their next fetch
        return;
    };

    let frame = match serde_json::to_string(&ServerEvent::NewMessage(message.clone())) {
        Ok(frame) => frame,
        Err(err) => {
            tracing::error!("serialize push event: {err}");
            return;
        }
    };

    if handle.send(frame).is_err() {
        tracing::debug!(receiver_id = %message.receiver_id, "push dropped, connection already closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    fn message(receiver_id: Uuid) -> Message {
        Message {
            id: Uuid::now_v7(),
            sender_id: Uuid::now_v7(),
            receiver_id,
            text: Some("hi".to_owned()),
            image: None,
            created_at: "2025-01-01T00:00:00Z".to_owned(),
        }
    }

    #[test]
    fn pushes_exactly_one_frame_to_the_receiver() {
        let registry = Registry::new();
        let receiver = Uuid::now_v7();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register(receiver, tx);

        let msg = message(receiver);
        dispatch(&registry, &msg);

        let frame = rx.try_recv().expect("one frame pushed");
        let event: ServerEvent = serde_json::from_str(&frame).expect("valid envelope");
        let ServerEvent::NewMessage(pushed) = event;
        assert_eq!(pushed.id, msg.id);
        assert!(rx.try_recv().is_err(), "exactly one push per dispatch");
    }

    #[test]
    fn offline_receiver_is_a_silent_noop() {
        let registry = Registry::new();
        dispatch(&registry, &message(Uuid::now_v7()));
    }

    #[test]
    fn closed_connection_is_swallowed() {
        let registry = Registry::new();
        let receiver = Uuid::now_v7();
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(receiver, tx);
        drop(rx);

        // must not panic or surface an error
        dispatch(&registry, &message(receiver));
    }

    #[test]
    fn envelope_is_typed_and_camel_cased() {
        let msg = message(Uuid::now_v7());
        let frame = serde_json::to_string(&ServerEvent::NewMessage(msg.clone())).unwrap();
        let v: serde_json::Value = serde_json::from_str(&frame).unwrap();

        assert_eq!(v["type"], NEW_MESSAGE);
        assert_eq!(v["payload"]["id"], msg.id.to_string());
        assert_eq!(v["payload"]["senderId"], msg.sender_id.to_string());
        assert_eq!(v["payload"]["receiverId"], msg.receiver_id.to_string());
        assert_eq!(v["payload"]["text"], "hi");
        assert!(v["payload"].get("image").is_none(), "absent image is omitted");
    }
}
