use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::rates::OfficialRates;
use crate::models::settings::Settings;
use super::traits::{ensure_valid_rate, OfficialRateProvider};

const PROVIDER: &str = "DolarVzla";

/// DolarVzla public API, which republishes the official BCV rates.
///
/// - **Free**: no API key.
/// - **Endpoint**: `/public/exchange-rate`, one GET.
/// - **Rates**: the `current.usd` / `current.eur` pair.
pub struct DolarVzlaProvider {
    client: Client,
    url: String,
}

impl DolarVzlaProvider {
    pub fn new(settings: &Settings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            url: settings.official_url.clone(),
        }
    }
}

impl Default for DolarVzlaProvider {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

// ── DolarVzla response types ────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExchangeRateResponse {
    pub current: Option<CurrentRates>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentRates {
    pub usd: f64,
    pub eur: f64,
}

/// Pull the current USD/EUR pair out of a response.
pub fn extract_rates(resp: &ExchangeRateResponse) -> Result<OfficialRates, CoreError> {
    let current = resp.current.as_ref().ok_or_else(|| CoreError::Api {
        provider: PROVIDER.into(),
        message: "Response has no current rates".into(),
    })?;

    Ok(OfficialRates {
        usd: ensure_valid_rate(PROVIDER, current.usd)?,
        eur: ensure_valid_rate(PROVIDER, current.eur)?,
    })
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl OfficialRateProvider for DolarVzlaProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_official_rates(&self) -> Result<OfficialRates, CoreError> {
        let resp: ExchangeRateResponse = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to parse exchange-rate response: {e}"),
            })?;

        extract_rates(&resp)
    }
}
