use axum::{Json, debug_handler, extract::State};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, appresult::bad_request, models::User, session::USER_ID, store};

#[derive(Deserialize)]
pub(crate) struct LoginBody {
    handle: String,
}

/// Find-or-create by handle, then bind the session to the user.
#[debug_handler(state = crate::AppState)]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(LoginBody { handle }): Json<LoginBody>,
) -> AppResult<Json<User>> {
    let handle = handle.trim();
    if handle.is_empty() {
        return Err(bad_request("handle is required"));
    }

    let user = match store::find_user_by_handle(&db_pool, handle).await? {
        Some(user) => user,
        None => super::create_user(&db_pool, handle).await?,
    };

    session.insert(USER_ID, user.id.to_string()).await?;
    Ok(Json(user))
}
