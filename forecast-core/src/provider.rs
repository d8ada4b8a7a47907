use crate::{ClassifiedError, Config, ForecastResult, provider::http::ForecastClient};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod http;

/// Source of forecast data for one city.
///
/// Implementations never retry and never panic: every failure comes back as a
/// [`ClassifiedError`].
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastResult, ClassifiedError>;
}

/// Construct the HTTP provider pointed at the configured base URL.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn ForecastProvider>> {
    let client = ForecastClient::new(config.base_url())?;
    Ok(Arc::new(client))
}
