use crate::{Config, WeatherSnapshot, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};
use thiserror::Error;

pub mod weatherapi;

/// Ways a lookup can fail. None of these reach the user beyond "not found".
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to reach weather provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Weather provider responded with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse weather provider response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The lookup task panicked or was aborted.
    #[error("Weather lookup task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for `city`. Exactly one outbound request.
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, ProviderError>;
}

/// Construct the WeatherAPI.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for WeatherAPI.com.\n\
                 Hint: run `skycast configure` or set SKYCAST_API_KEY."
        )
    })?;

    let provider = WeatherApiProvider::new(
        api_key.to_owned(),
        config.base_url.clone(),
        config.timeout(),
    )?;

    Ok(Arc::new(provider))
}
