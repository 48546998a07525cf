//! HTTP client for the generated collection endpoints.

use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::models::{Building, Device, Event};

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn get_building(&self) -> Result<Building, ClientError> {
        self.get_json("/Building").await
    }

    pub async fn get_device(&self) -> Result<Device, ClientError> {
        self.get_json("/Device").await
    }

    pub async fn get_event(&self) -> Result<Event, ClientError> {
        self.get_json("/Event").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{path}", self.base_url.trim_end_matches('/'));
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.json().await?)
    }
}
