use axum::{Json, debug_handler, extract::State};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, models::User, session::current_user_id, store};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn sidebar(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Json<Vec<User>>> {
    let me = current_user_id(&session).await?;
    Ok(Json(store::sidebar_users(&db_pool, me).await?))
}
