use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use serde_json::Value;

/// Handler for one named push event; receives the envelope payload.
pub type Handler = Box<dyn FnMut(Value) + Send>;

/// Client side of the push transport: a named-event emitter in the socket.io
/// mold. Whatever owns the network connection feeds raw frames in through
/// [`Socket::feed`]; the socket parses the `{type, payload}` envelope and
/// invokes the handlers registered for that event name.
#[derive(Clone, Default)]
pub struct Socket {
    handlers: Arc<Mutex<HashMap<String, Vec<Handler>>>>,
}

impl Socket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler for `event`. Handlers stack, as on any event emitter;
    /// callers that want exactly one call [`Socket::off`] first.
    pub fn on(&self, event: &str, handler: Handler) {
        self.handlers
            .lock()
            .expect("socket handlers poisoned")
            .entry(event.to_owned())
            .or_default()
            .push(handler);
    }

    /// Drops every handler for `event`; no-op when there are none.
    pub fn off(&self, event: &str) {
        self.handlers
            .lock()
            .expect("socket handlers poisoned")
            .remove(event);
    }

    /// Ingress for raw frames. Frames that don't parse as an envelope and
    /// events nobody listens for are dropped silently.
    pub fn feed(&self, frame: &str) {
        let Ok(envelope) = serde_json::from_str::<Value>(frame) else {
            return;
        };
        let Some(event) = envelope.get("type").and_then(Value::as_str) else {
            return;
        };
        let payload = envelope.get("payload").cloned().unwrap_or(Value::Null);

        let mut handlers = self.handlers.lock().expect("socket handlers poisoned");
        if let Some(list) = handlers.get_mut(event) {
            for handler in list {
                handler(payload.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_handler(hits: &Arc<AtomicUsize>) -> Handler {
        let hits = Arc::clone(hits);
        Box::new(move |_payload| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn feed_routes_to_the_named_handler() {
        let socket = Socket::new();
        let hits = Arc::new(AtomicUsize::new(0));
        socket.on("newMessage", counting_handler(&hits));

        socket.feed(r#"{"type":"newMessage","payload":{"x":1}}"#);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handlers_stack_until_off() {
        let socket = Socket::new();
        let hits = Arc::new(AtomicUsize::new(0));
        socket.on("newMessage", counting_handler(&hits));
        socket.on("newMessage", counting_handler(&hits));

        socket.feed(r#"{"type":"newMessage","payload":null}"#);
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        socket.off("newMessage");
        socket.feed(r#"{"type":"newMessage","payload":null}"#);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn garbage_and_unknown_events_are_dropped() {
        let socket = Socket::new();
        let hits = Arc::new(AtomicUsize::new(0));
        socket.on("newMessage", counting_handler(&hits));

        socket.feed("not json at all");
        socket.feed(r#"{"payload":{}}"#);
        socket.feed(r#"{"type":"somethingElse","payload":{}}"#);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn off_without_handlers_is_a_noop() {
        Socket::new().off("newMessage");
    }
}
