use anyhow::bail;
use serde::{Deserialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::models::{Message, MessageDraft, User};

use super::ChatApi;

/// [`ChatApi`] over HTTP, with a cookie jar carrying the session.
pub struct HttpApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { base_url, http })
    }

    pub async fn login(&self, handle: &str) -> anyhow::Result<User> {
        let res = self
            .http
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&serde_json::json!({ "handle": handle }))
            .send()
            .await?;
        expect_json(res).await
    }
}

impl ChatApi for HttpApi {
    async fn fetch_users(&self) -> anyhow::Result<Vec<User>> {
        let res = self
            .http
            .get(format!("{}/api/messages/users", self.base_url))
            .send()
            .await?;
        expect_json(res).await
    }

    async fn fetch_messages(&self, user_id: Uuid) -> anyhow::Result<Vec<Message>> {
        let res = self
            .http
            .get(format!("{}/api/messages/{user_id}", self.base_url))
            .send()
            .await?;
        expect_json(res).await
    }

    async fn send_message(
        &self,
        receiver_id: Uuid,
        draft: &MessageDraft,
    ) -> anyhow::Result<Message> {
        let res = self
            .http
            .post(format!("{}/api/messages/send/{receiver_id}", self.base_url))
            .json(draft)
            .send()
            .await?;
        expect_json(res).await
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Decode a 2xx body, or surface the server's `{"error": …}` message.
async fn expect_json<T: DeserializeOwned>(res: reqwest::Response) -> anyhow::Result<T> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json().await?);
    }
    match res.json::<ErrorBody>().await {
        Ok(body) => bail!("{}", body.error),
        Err(_) => bail!("request failed with status {status}"),
    }
}
