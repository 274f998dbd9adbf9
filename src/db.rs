use sqlx::SqlitePool;

/// Creates the schema if missing. Safe to run on every startup.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id     TEXT PRIMARY KEY,
            handle TEXT NOT NULL UNIQUE,
            alias  TEXT NOT NULL
        );"#,
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id          TEXT PRIMARY KEY,
            sender_id   TEXT NOT NULL,
            receiver_id TEXT NOT NULL,
            text        TEXT,
            image       TEXT,
            created_at  TEXT NOT NULL,
            FOREIGN KEY(sender_id)   REFERENCES users(id),
            FOREIGN KEY(receiver_id) REFERENCES users(id)
        );"#,
        // conversation fetches filter on the pair in both directions
        "CREATE INDEX IF NOT EXISTS messages_sender_receiver ON messages (sender_id, receiver_id);",
    ];

    for stmt in stmts {
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}
