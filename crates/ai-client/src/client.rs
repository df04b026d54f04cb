use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tracing::instrument;

use crate::types::{AiError, AiRequest, RawAiResponse};

pub struct AiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl AiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout_ms: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// One attempt against the analysis service. Recovery belongs to the
    /// caller's fallback layer; there is no retry here.
    ///
    /// The expected response schema rides along in the payload so the
    /// service can constrain its model output to it.
    #[instrument(skip(self, request), fields(request_id = %request.request_id))]
    pub async fn analyze(&self, request: &AiRequest) -> Result<RawAiResponse, AiError> {
        let response_schema = schemars::schema_for!(RawAiResponse);
        let payload = json!({
            "request_id": request.request_id,
            "price": request.price,
            "niche": request.niche,
            "image_url": request.image_url,
            "response_schema": response_schema,
        });

        let mut builder = self
            .client
            .post(format!("{}/v1/analyze", self.base_url))
            .header("content-type", "application/json")
            .json(&payload);
        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AiError::Timeout
            } else {
                AiError::Request(e.to_string())
            }
        })?;

        let status = response.status();
        // 409/429 mean a duplicate analysis is already running upstream.
        if status.as_u16() == 409 || status.as_u16() == 429 {
            return Err(AiError::InProgress);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;
        let raw: RawAiResponse = serde_json::from_str(&body)?;
        Ok(raw)
    }
}
