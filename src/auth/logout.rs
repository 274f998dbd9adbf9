use axum::debug_handler;
use tower_sessions::Session;

use crate::AppResult;

#[debug_handler]
pub(crate) async fn logout(session: Session) -> AppResult<()> {
    session.clear().await;
    Ok(())
}
