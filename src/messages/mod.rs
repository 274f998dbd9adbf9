mod list;
mod send;
mod users;
pub mod ws;

use axum::{Router, routing::{get, post}};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::sidebar))
        .route("/{id}", get(list::conversation))
        .route("/send/{id}", post(send::send_message))
}
