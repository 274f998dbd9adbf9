pub mod appresult;
pub mod auth;
pub mod client;
pub mod db;
pub mod dispatch;
pub mod messages;
pub mod models;
pub mod registry;
pub mod session;
pub mod store;

pub use appresult::{AppError, AppResult};

use axum::{Router, extract::FromRef, http::{HeaderValue, Method, header}, routing::get};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};

use crate::registry::Registry;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub registry: Registry,
}

/// The whole app: routes, sessions, CORS. `main` only adds the listener,
/// tests run it on an ephemeral port.
pub fn app(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(12)));

    // the browser client runs on the vite dev port and sends the session cookie
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("http://localhost:5173"))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/ws", get(messages::ws::ws_handler))
        .nest("/api/auth", auth::router())
        .nest("/api/messages", messages::router())
        .with_state(state)
        .layer(session_layer)
        .layer(cors)
}
