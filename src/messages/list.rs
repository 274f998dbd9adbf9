use axum::{Json, debug_handler, extract::{Path, State}};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{AppResult, models::Message, session::current_user_id, store};

/// Full resync of the conversation with `{id}`, oldest first.
#[debug_handler(state = crate::AppState)]
pub(crate) async fn conversation(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(other): Path<Uuid>,
) -> AppResult<Json<Vec<Message>>> {
    let me = current_user_id(&session).await?;
    Ok(Json(store::conversation(&db_pool, me, other).await?))
}
