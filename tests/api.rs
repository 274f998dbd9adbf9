use std::fs;

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sweetnothings::{
    AppState,
    client::{ChatApi, http::HttpApi},
    db,
    models::MessageDraft,
    registry::Registry,
};
use tempfile::TempDir;

/// Boots the full app against a tempdir sqlite file, on an ephemeral port.
async fn spawn_app(tempdir: &TempDir) -> Result<String> {
    let db_path = tempdir.path().join("sweetnothings.db");
    fs::File::create(&db_path)?;

    let db_pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect(&format!("sqlite://{}", db_path.display()))
        .await?;
    db::migrate(&db_pool).await?;

    let app = sweetnothings::app(AppState { db_pool, registry: Registry::new() });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn migrations_create_the_tables() -> Result<()> {
    let td = TempDir::new()?;
    let db_path = td.path().join("sweetnothings.db");
    fs::File::create(&db_path)?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&format!("sqlite://{}", db_path.display()))
        .await?;
    db::migrate(&pool).await?;
    // idempotent on a second run
    db::migrate(&pool).await?;

    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('users','messages')",
    )
    .fetch_all(&pool)
    .await?;

    for expected in ["users", "messages"] {
        assert!(names.contains(&expected.to_string()), "missing table {expected}");
    }
    Ok(())
}

#[tokio::test]
async fn message_round_trip_between_two_users() -> Result<()> {
    let td = TempDir::new()?;
    let base = spawn_app(&td).await?;

    let amelie = HttpApi::new(&base)?;
    let basil = HttpApi::new(&base)?;
    let amelie_user = amelie.login("amelie").await?;
    let basil_user = basil.login("basil").await?;

    // sidebar excludes the caller
    let others = amelie.fetch_users().await?;
    assert_eq!(others.len(), 1);
    assert_eq!(others[0].id, basil_user.id);

    let first = amelie
        .send_message(basil_user.id, &MessageDraft { text: Some("hi".to_owned()), image: None })
        .await?;
    assert_eq!(first.sender_id, amelie_user.id);
    assert_eq!(first.receiver_id, basil_user.id);

    let reply = basil
        .send_message(amelie_user.id, &MessageDraft { text: Some("hey".to_owned()), image: None })
        .await?;

    // both directions, oldest first, ids assigned by the server
    let seen = basil.fetch_messages(amelie_user.id).await?;
    assert_eq!(seen, vec![first.clone(), reply.clone()]);
    let seen = amelie.fetch_messages(basil_user.id).await?;
    assert_eq!(seen, vec![first, reply]);
    Ok(())
}

#[tokio::test]
async fn logging_in_twice_reuses_the_account() -> Result<()> {
    let td = TempDir::new()?;
    let base = spawn_app(&td).await?;

    let first = HttpApi::new(&base)?.login("amelie").await?;
    let second = HttpApi::new(&base)?.login("amelie").await?;
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn invalid_drafts_are_rejected() -> Result<()> {
    let td = TempDir::new()?;
    let base = spawn_app(&td).await?;

    let amelie = HttpApi::new(&base)?;
    amelie.login("amelie").await?;
    let basil_user = HttpApi::new(&base)?.login("basil").await?;

    let err = amelie
        .send_message(basil_user.id, &MessageDraft::default())
        .await
        .expect_err("empty draft must be rejected");
    assert_eq!(err.to_string(), "text or image is required");

    let err = amelie
        .send_message(
            basil_user.id,
            &MessageDraft { text: None, image: Some("https://example.com/cat.png".to_owned()) },
        )
        .await
        .expect_err("non data-url image must be rejected");
    assert_eq!(err.to_string(), "invalid image format");

    let seen = amelie.fetch_messages(basil_user.id).await?;
    assert!(seen.is_empty(), "rejected sends must not persist anything");
    Ok(())
}

#[tokio::test]
async fn requests_without_a_session_are_unauthorized() -> Result<()> {
    let td = TempDir::new()?;
    let base = spawn_app(&td).await?;

    let anonymous = HttpApi::new(&base)?;
    let err = anonymous.fetch_users().await.expect_err("no session, no sidebar");
    assert_eq!(err.to_string(), "unauthorized");
    Ok(())
}
