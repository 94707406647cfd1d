//! Client for the Demesne API.

use demesne_core::{
    dto::{ErrorBody, NewExample},
    types::{Creature, Example, Spell},
};
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Could not reach the API: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },
}

#[derive(Debug, Clone)]
pub struct BffClient {
    client: Client,
    base_url: String,
}

impl Default for BffClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl BffClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn creatures(&self) -> Result<Vec<Creature>, ClientError> {
        self.get("/api/creatures").await
    }

    pub async fn spells(&self) -> Result<Vec<Spell>, ClientError> {
        self.get("/api/spells").await
    }

    pub async fn examples(&self) -> Result<Vec<Example>, ClientError> {
        self.get("/api/examples").await
    }

    pub async fn create_example(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Example, ClientError> {
        let body = NewExample {
            name: name.to_string(),
            description: description.to_string(),
        };
        let url = format!("{}/api/examples", self.base_url);
        debug!("POST {url}");
        let response = self.client.post(&url).json(&body).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        Ok(check(response).await?.json().await?)
    }
}

/// Turns a non-2xx response into a `ClientError::Status` carrying the server's message.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|body| body.text().to_string())
        .unwrap_or_else(|_| format!("API request failed with status {}", status.as_u16()));
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}
