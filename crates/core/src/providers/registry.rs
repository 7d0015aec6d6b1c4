use crate::models::settings::Settings;

use super::binance_p2p::BinanceP2pProvider;
use super::dolarvzla::DolarVzlaProvider;
use super::traits::{MarketRateProvider, OfficialRateProvider};

/// The pair of rate sources the aggregator pulls from.
///
/// Providers are boxed trait objects so a source can be swapped (or
/// mocked in tests) without touching the aggregation logic.
pub struct RateSources {
    pub official: Box<dyn OfficialRateProvider>,
    pub market: Box<dyn MarketRateProvider>,
}

impl RateSources {
    pub fn new(
        official: Box<dyn OfficialRateProvider>,
        market: Box<dyn MarketRateProvider>,
    ) -> Self {
        Self { official, market }
    }

    /// DolarVzla for the official rates and Binance P2P for the market
    /// rate, both configured from `settings`.
    pub fn new_with_defaults(settings: &Settings) -> Self {
        Self::new(
            Box::new(DolarVzlaProvider::new(settings)),
            Box::new(BinanceP2pProvider::new(settings)),
        )
    }

    /// Names of the configured providers, official first.
    pub fn provider_names(&self) -> [String; 2] {
        [
            self.official.name().to_string(),
            self.market.name().to_string(),
        ]
    }
}
