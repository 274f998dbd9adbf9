use axum::{
    debug_handler,
    extract::{State, WebSocketUpgrade, ws::{Message as WsFrame, WebSocket}},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{AppResult, registry::Registry, session::current_user_id};

/// Push transport endpoint. Connect/disconnect drive the registry; everything
/// a client receives here comes from the dispatcher.
#[debug_handler(state = crate::AppState)]
pub async fn ws_handler(
    State(registry): State<Registry>,
    session: Session,
    ws: WebSocketUpgrade,
) -> AppResult<Response> {
    let user_id = current_user_id(&session).await?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, registry, user_id)))
}

async fn handle_socket(socket: WebSocket, registry: Registry, user_id: Uuid) {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    registry.register(user_id, tx.clone());
    tracing::info!(%user_id, "websocket connected");

    let (mut sender, mut receiver) = socket.split();
    let forward = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(WsFrame::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // push-only transport: nothing application-level arrives from the client,
    // so just drain until the connection goes away
    while let Some(Ok(frame)) = receiver.next().await {
        if let WsFrame::Close(_) = frame {
            break;
        }
    }

    forward.abort();
    // compare handles so a reconnect that already replaced us stays registered
    registry.unregister_handle(user_id, &tx);
    tracing::info!(%user_id, "websocket disconnected");
}
