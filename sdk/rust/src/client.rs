//! Typed async client for the hero routes API.

use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status and JSON body of one API call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

pub struct HeroClient {
    client: Client,
    base_url: String,
}

impl HeroClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .pool_max_idle_per_host(0)
                .no_proxy()
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn root(&self) -> Result<ApiReply, reqwest::Error> {
        self.get("/").await
    }

    pub async fn my_profile(&self) -> Result<ApiReply, reqwest::Error> {
        self.get("/api/profile/me").await
    }

    /// POST a JSON body to the profile update endpoint.
    pub async fn update_profile(&self, body: &Value) -> Result<ApiReply, reqwest::Error> {
        let resp = self
            .client
            .post(format!("{}/api/profile", self.base_url))
            .json(body)
            .send()
            .await?;
        Self::reply(resp).await
    }

    pub async fn profile(&self, id: &str) -> Result<ApiReply, reqwest::Error> {
        self.get(&format!("/api/profile/{id}")).await
    }

    /// Search; `None` omits the query parameter entirely.
    pub async fn search(&self, query: Option<&str>) -> Result<ApiReply, reqwest::Error> {
        let mut req = self.client.get(format!("{}/api/search", self.base_url));
        if let Some(query) = query {
            req = req.query(&[("query", query)]);
        }
        Self::reply(req.send().await?).await
    }

    pub async fn user_post(&self, user_id: &str, post_id: &str) -> Result<ApiReply, reqwest::Error> {
        self.get(&format!("/api/profile/me/{user_id}/posts/{post_id}"))
            .await
    }

    /// Versioned profile, `version` being "v1" or "v2".
    pub async fn versioned_profile(&self, version: &str) -> Result<ApiReply, reqwest::Error> {
        self.get(&format!("/api/{version}/profile/me")).await
    }

    /// Send any method to any path.
    pub async fn request(&self, method: Method, path: &str) -> Result<ApiReply, reqwest::Error> {
        let resp = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .send()
            .await?;
        Self::reply(resp).await
    }

    async fn get(&self, path: &str) -> Result<ApiReply, reqwest::Error> {
        self.request(Method::GET, path).await
    }

    async fn reply(resp: reqwest::Response) -> Result<ApiReply, reqwest::Error> {
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(ApiReply { status, body })
    }
}
