use sqlx::SqlitePool;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use uuid::Uuid;

use crate::{AppResult, models::{Message, User}};

/// Current instant, UTC, RFC3339.
pub fn now_timestamp() -> AppResult<String> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}

/// Persists a draft and returns the canonical record. The id (v7, so
/// time-ordered) and timestamp are assigned here and nowhere else.
pub async fn save_message(
    pool: &SqlitePool,
    sender_id: Uuid,
    receiver_id: Uuid,
    text: Option<String>,
    image: Option<String>,
) -> AppResult<Message> {
    let id = Uuid::now_v7();
    let created_at = now_timestamp()?;

    sqlx::query("INSERT INTO messages (id,sender_id,receiver_id,text,image,created_at) VALUES (?,?,?,?,?,?)")
        .bind(id.to_string())
        .bind(sender_id.to_string())
        .bind(receiver_id.to_string())
        .bind(&text)
        .bind(&image)
        .bind(&created_at)
        .execute(pool)
        .await?;

    Ok(Message { id, sender_id, receiver_id, text, image, created_at })
}

/// Both directions of a conversation, creation order ascending.
/// Ordering rides on the v7 ids rather than the timestamp strings.
pub async fn conversation(pool: &SqlitePool, me: Uuid, other: Uuid) -> AppResult<Vec<Message>> {
    let rows: Vec<(String, String, String, Option<String>, Option<String>, String)> = sqlx::query_as(
        "SELECT id,sender_id,receiver_id,text,image,created_at FROM messages
         WHERE (sender_id=? AND receiver_id=?) OR (sender_id=? AND receiver_id=?)
         ORDER BY id ASC",
    )
    .bind(me.to_string())
    .bind(other.to_string())
    .bind(other.to_string())
    .bind(me.to_string())
    .fetch_all(pool)
    .await?;

    let mut messages = Vec::with_capacity(rows.len());
    for (id, sender_id, receiver_id, text, image, created_at) in rows {
        messages.push(Message {
            id: Uuid::parse_str(&id)?,
            sender_id: Uuid::parse_str(&sender_id)?,
            receiver_id: Uuid::parse_str(&receiver_id)?,
            text,
            image,
            created_at,
        });
    }
    Ok(messages)
}

/// Everyone except the caller, for the conversation sidebar.
pub async fn sidebar_users(pool: &SqlitePool, me: Uuid) -> AppResult<Vec<User>> {
    let rows: Vec<(String, String, String)> =
        sqlx::query_as("SELECT id,handle,alias FROM users WHERE id!=? ORDER BY handle ASC")
            .bind(me.to_string())
            .fetch_all(pool)
            .await?;

    let mut users = Vec::with_capacity(rows.len());
    for (id, handle, alias) in rows {
        users.push(User { id: Uuid::parse_str(&id)?, handle, alias });
    }
    Ok(users)
}

pub async fn find_user(pool: &SqlitePool, id: Uuid) -> AppResult<Option<User>> {
    let row: Option<(String, String)> = sqlx::query_as("SELECT handle,alias FROM users WHERE id=?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(handle, alias)| User { id, handle, alias }))
}

pub async fn find_user_by_handle(pool: &SqlitePool, handle: &str) -> AppResult<Option<User>> {
    let row: Option<(String, String)> = sqlx::query_as("SELECT id,alias FROM users WHERE handle=?")
        .bind(handle)
        .fetch_optional(pool)
        .await?;

    match row {
        Some((id, alias)) => Ok(Some(User {
            id: Uuid::parse_str(&id)?,
            handle: handle.to_owned(),
            alias,
        })),
        None => Ok(None),
    }
}
