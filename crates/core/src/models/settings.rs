use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use super::history::MAX_HISTORY;

/// Runtime configuration. Every field has a default, so a partial JSON
/// document (or none at all) is enough to build a tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key of the history blob in the key-value store.
    pub history_key: String,

    /// Maximum number of history entries kept in the store.
    pub max_history: usize,

    /// IANA timezone used to render entry timestamps.
    pub timezone: String,

    /// Binance P2P advertisement search endpoint.
    pub binance_url: String,

    /// Official BCV rates endpoint.
    pub official_url: String,

    /// Filters sent with every P2P search.
    pub p2p: P2pQuery,

    /// Per-request timeout for outbound calls, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_key: "price_history".to_string(),
            max_history: MAX_HISTORY,
            timezone: "America/Caracas".to_string(),
            binance_url: "https://p2p.binance.com/bapi/c2c/v2/friendly/c2c/adv/search"
                .to_string(),
            official_url: "https://api.dolarvzla.com/public/exchange-rate".to_string(),
            p2p: P2pQuery::default(),
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::Config(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.history_key.is_empty() {
            return Err(CoreError::Config("history_key must not be empty".into()));
        }
        if self.max_history == 0 {
            return Err(CoreError::Config("max_history must be at least 1".into()));
        }
        if self.p2p.rows == 0 {
            return Err(CoreError::Config("p2p.rows must be at least 1".into()));
        }
        self.tz()?;
        Ok(())
    }

    /// The configured timezone, parsed.
    pub fn tz(&self) -> Result<Tz, CoreError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| CoreError::InvalidTimezone(self.timezone.clone()))
    }
}

/// Binance P2P search filters. Serialized as the request body, hence the
/// camelCase wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct P2pQuery {
    pub page: u32,
    pub rows: u32,
    pub pay_types: Vec<String>,
    pub asset: String,
    pub trade_type: String,
    pub fiat: String,
    pub merchant_check: bool,
}

impl Default for P2pQuery {
    fn default() -> Self {
        Self {
            page: 1,
            rows: 20,
            pay_types: vec![
                "Bancamiga".to_string(),
                "Banesco".to_string(),
                "PagoMovil".to_string(),
            ],
            asset: "USDT".to_string(),
            trade_type: "BUY".to_string(),
            fiat: "VES".to_string(),
            merchant_check: false,
        }
    }
}
