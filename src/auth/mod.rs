mod login;
mod logout;
mod me;

use axum::{Router, routing::{get, post}};
use rand::seq::IndexedRandom;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{AppResult, AppState, models::User};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login::login))
        .route("/logout", post(logout::logout))
        .route("/me", get(me::me))
}

pub(crate) async fn create_user(pool: &SqlitePool, handle: &str) -> AppResult<User> {
    let id = Uuid::now_v7();
    let adjectives = [
        "Quick", "Lazy", "Mysterious", "Jolly", "Brave", "Silent", "Witty", "Fierce",
        "Clever", "Gentle", "Wild", "Calm", "Bold", "Shy", "Proud", "Happy",
        "Eager", "Fancy", "Rusty", "Golden", "Silver", "Bright", "Dark", "Lucky",
    ];
    let nouns = [
        "Fox", "Bear", "Eagle", "Wolf", "Dragon", "Tiger", "Lion", "Owl", "Rabbit",
        "Falcon", "Hawk", "Shark", "Panda", "Kitten", "Puppy", "Phoenix", "Griffin",
        "Turtle", "Dolphin", "Whale", "Elephant", "Giraffe", "Zebra",
    ];
    let alias = format!(
        "{} {}",
        adjectives.choose(&mut rand::rng()).unwrap(),
        nouns.choose(&mut rand::rng()).unwrap()
    );

    tracing::info!(%id, handle, alias, "new user");
    sqlx::query("INSERT INTO users (id,handle,alias) VALUES (?,?,?)")
        .bind(id.to_string())
        .bind(handle)
        .bind(&alias)
        .execute(pool)
        .await?;

    Ok(User { id, handle: handle.to_owned(), alias })
}
