use crate::models::chart::{ChartData, ChartDataset, LABEL_BCV, LABEL_BCV_EUR, LABEL_BINANCE};
use crate::models::history::HistoryEntry;

/// Turns the stored history into chart-ready series.
///
/// The core computes all the numbers, the frontend only renders:
/// - one label per entry (its display timestamp)
/// - one dataset per tracked rate, always in the order BCV-EUR, BCV, Binance
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Build the chart for a history, oldest entry first.
    pub fn build_chart(&self, history: &[HistoryEntry]) -> ChartData {
        let labels = history.iter().map(|e| e.timestamp.clone()).collect();

        let series = |label: &str, pick: fn(&HistoryEntry) -> f64| ChartDataset {
            label: label.to_string(),
            data: history.iter().map(pick).collect(),
        };

        ChartData {
            labels,
            datasets: vec![
                series(LABEL_BCV_EUR, |e| e.bcv_eur),
                series(LABEL_BCV, |e| e.bcv),
                series(LABEL_BINANCE, |e| e.binance),
            ],
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
