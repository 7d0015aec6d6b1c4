use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::settings::{P2pQuery, Settings};
use super::traits::{ensure_valid_rate, MarketRateProvider};

const PROVIDER: &str = "Binance P2P";

/// Binance peer-to-peer market rate for USDT priced in bolívares.
///
/// - **Free**: public endpoint, no API key.
/// - **Request**: one POST with the advertisement filters from `P2pQuery`
///   (trade side, asset, fiat, accepted payment rails, page size).
/// - **Rate**: arithmetic mean of the advertised unit prices on the page.
pub struct BinanceP2pProvider {
    client: Client,
    url: String,
    query: P2pQuery,
}

impl BinanceP2pProvider {
    pub fn new(settings: &Settings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            url: settings.binance_url.clone(),
            query: settings.p2p.clone(),
        }
    }
}

impl Default for BinanceP2pProvider {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

// ── Binance P2P response types ──────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub success: bool,
    pub data: Option<Vec<Advertisement>>,
}

#[derive(Debug, Deserialize)]
pub struct Advertisement {
    pub adv: AdvDetail,
}

#[derive(Debug, Deserialize)]
pub struct AdvDetail {
    /// Unit price, sent as a decimal string.
    pub price: String,
}

/// Average the advertised prices of a search response.
///
/// An unsuccessful flag, a missing or empty page, or any unparsable
/// price makes the whole response unusable.
pub fn average_price(resp: &SearchResponse) -> Result<f64, CoreError> {
    if !resp.success {
        return Err(CoreError::Api {
            provider: PROVIDER.into(),
            message: "Search returned success = false".into(),
        });
    }

    let ads = match resp.data.as_deref() {
        Some(ads) if !ads.is_empty() => ads,
        _ => {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: "Search returned no advertisements".into(),
            })
        }
    };

    let mut sum = 0.0;
    for ad in ads {
        let price: f64 = ad.adv.price.trim().parse().map_err(|_| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Unparsable advertisement price {:?}", ad.adv.price),
        })?;
        sum += price;
    }

    ensure_valid_rate(PROVIDER, sum / ads.len() as f64)
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketRateProvider for BinanceP2pProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_market_rate(&self) -> Result<f64, CoreError> {
        let resp: SearchResponse = self
            .client
            .post(&self.url)
            .json(&self.query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!(
                    "Failed to parse search response for {}/{}: {e}",
                    self.query.asset, self.query.fiat
                ),
            })?;

        average_price(&resp)
    }
}
