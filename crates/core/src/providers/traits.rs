use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::rates::OfficialRates;

/// Source of the peer-to-peer market rate (bolívares per USDT).
///
/// Implementations make exactly one outbound call per invocation and
/// report any failure as an error; retrying is left to the next
/// scheduled run.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketRateProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    async fn fetch_market_rate(&self) -> Result<f64, CoreError>;
}

/// Source of the official USD/EUR reference rates.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait OfficialRateProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    async fn fetch_official_rates(&self) -> Result<OfficialRates, CoreError>;
}

/// Rates end up in the stored history, which must only ever hold
/// finite, non-negative numbers.
pub fn ensure_valid_rate(provider: &str, value: f64) -> Result<f64, CoreError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CoreError::InvalidRate {
            provider: provider.to_string(),
            value,
        })
    }
}
