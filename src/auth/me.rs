use axum::{Json, debug_handler, extract::State};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, appresult::AppError, models::User, session::current_user_id, store};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn me(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Json<User>> {
    let user_id = current_user_id(&session).await?;
    let Some(user) = store::find_user(&db_pool, user_id).await? else {
        // session survived the user row; treat it as not logged in
        return Err(AppError::Unauthorized);
    };
    Ok(Json(user))
}
