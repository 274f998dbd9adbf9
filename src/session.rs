use tower_sessions::Session;
use uuid::Uuid;

use crate::appresult::{AppError, AppResult};

pub const USER_ID: &str = "user_id";

/// The active principal, or 401 when the session carries none.
pub async fn current_user_id(session: &Session) -> AppResult<Uuid> {
    let Some(user_id) = session.get::<String>(USER_ID).await? else {
        return Err(AppError::Unauthorized);
    };
    Ok(Uuid::parse_str(&user_id)?)
}
