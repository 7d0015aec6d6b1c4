use serde::{Deserialize, Serialize};

use super::chart::ChartData;

/// The served view of the rates: latest values, the Binance movement
/// against the previous entry, and the chart series.
///
/// Field names on the wire match what existing clients read, which is
/// why `bcv_eur` stays snake_case while the rest are camelCase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub bcv: f64,
    pub bcv_eur: f64,
    pub binance: f64,
    #[serde(rename = "binancePrev")]
    pub binance_prev: f64,
    #[serde(rename = "binanceDiff")]
    pub binance_diff: f64,
    #[serde(rename = "binancePercent")]
    pub binance_percent: f64,
    #[serde(rename = "chartData")]
    pub chart_data: ChartData,
    /// RFC 3339 instant of the last refresh, `None` until the first load.
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<String>,
}
