use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde_json::Value;
use tracing::instrument;

use crate::{
    error::{ClassifiedError, Failure, classify},
    model::ForecastResult,
    normalize::normalize,
};

use super::ForecastProvider;

/// Hard bound on a single forecast request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for `GET {base_url}/forecast?city=...`.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    base_url: String,
    http: Client,
}

impl ForecastClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub(crate) fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for the forecast service")?;

        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self), level = "debug")]
    async fn request(&self, city: &str) -> Result<ForecastResult, Failure> {
        let url = format!("{}/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("city", city)])
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(transport_failure)?;

        let status = res.status();
        let body = res.text().await.map_err(transport_failure)?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "forecast response received");

        if !status.is_success() {
            return Err(Failure::Http { status: status.as_u16(), server_message: server_message(&body) });
        }

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| Failure::Malformed { detail: format!("invalid JSON: {e}") })?;

        let message = json.get("message").and_then(Value::as_str).map(str::to_owned);

        if !reports_success(&json) {
            return Err(Failure::Unsuccessful { server_message: message });
        }

        let entries = normalize(&json).map_err(|e| Failure::Malformed { detail: e.to_string() })?;

        Ok(ForecastResult { success: true, entries, message })
    }
}

#[async_trait]
impl ForecastProvider for ForecastClient {
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastResult, ClassifiedError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(classify(&Failure::Invalid { detail: "empty city".to_string() }, city));
        }

        self.request(city).await.map_err(|failure| {
            let err = classify(&failure, city);
            tracing::warn!(city, category = %err.category, ?failure, "forecast request failed");
            err
        })
    }
}

fn transport_failure(err: reqwest::Error) -> Failure {
    if err.is_timeout() {
        Failure::Timeout
    } else {
        Failure::Network { detail: err.to_string() }
    }
}

/// A bare array counts as success; an envelope must say so explicitly.
fn reports_success(json: &Value) -> bool {
    match json {
        Value::Array(_) => true,
        other => other.get("success").and_then(Value::as_bool).unwrap_or(false),
    }
}

fn server_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("message").and_then(Value::as_str).map(str::to_owned)
}
