use axum::{
    Json, debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    AppResult, appresult::bad_request, dispatch, models::MessageDraft, registry::Registry,
    session::current_user_id, store,
};

/// Persist first, then fan out. The push is additive: once the insert has
/// succeeded nothing on the dispatch side can turn this into an error response.
#[debug_handler(state = crate::AppState)]
pub(crate) async fn send_message(
    State(db_pool): State<SqlitePool>,
    State(registry): State<Registry>,
    session: Session,
    Path(receiver_id): Path<Uuid>,
    Json(draft): Json<MessageDraft>,
) -> AppResult<Response> {
    let sender_id = current_user_id(&session).await?;

    let MessageDraft { text, image } = draft;
    let text = text.filter(|t| !t.is_empty());
    let image = image.filter(|i| !i.is_empty());
    if text.is_none() && image.is_none() {
        return Err(bad_request("text or image is required"));
    }
    if let Some(image) = &image {
        validate_image(image)?;
    }

    let message = store::save_message(&db_pool, sender_id, receiver_id, text, image).await?;
    dispatch::dispatch(&registry, &message);

    Ok((StatusCode::CREATED, Json(message)).into_response())
}

/// Accepts `data:image/(png|jpg|jpeg|gif);base64,...` and nothing else.
fn validate_image(image: &str) -> AppResult<()> {
    let invalid = || bad_request("invalid image format");

    let rest = image.strip_prefix("data:image/").ok_or_else(invalid)?;
    let (subtype, payload) = rest.split_once(";base64,").ok_or_else(invalid)?;
    if !matches!(subtype, "png" | "jpg" | "jpeg" | "gif") || payload.is_empty() {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_image;

    #[test]
    fn accepts_known_data_urls() {
        for subtype in ["png", "jpg", "jpeg", "gif"] {
            assert!(validate_image(&format!("data:image/{subtype};base64,aGVsbG8=")).is_ok());
        }
    }

    #[test]
    fn rejects_everything_else() {
        for bad in [
            "https://example.com/cat.png",
            "data:image/webp;base64,aGVsbG8=",
            "data:image/png,aGVsbG8=",
            "data:image/png;base64,",
            "aGVsbG8=",
        ] {
            assert!(validate_image(bad).is_err(), "{bad} should be rejected");
        }
    }
}
