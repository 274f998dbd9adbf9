use sqlx::sqlite::SqlitePoolOptions;
use sweetnothings::{AppState, db, registry::Registry};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sweetnothings=info")),
        )
        .init();

    let db_pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(dotenv::var("DATABASE_URL").unwrap().as_str())
        .await
        .unwrap();
    db::migrate(&db_pool).await.unwrap();

    let app = sweetnothings::app(AppState { db_pool, registry: Registry::new() });

    let bind_addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    tracing::info!(%bind_addr, "listening");
    axum::serve(listener, app).await.unwrap();
}
