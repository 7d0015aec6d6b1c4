use serde::{Deserialize, Serialize};

/// Dataset labels, in the order they are emitted.
pub const LABEL_BCV_EUR: &str = "BCV-EUR";
pub const LABEL_BCV: &str = "BCV";
pub const LABEL_BINANCE: &str = "Binance";

/// Chart-ready series: one label per history entry and one dataset per
/// tracked rate. The frontend renders it as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// A single named series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
}

impl ChartData {
    /// Look up a dataset by its label.
    pub fn dataset(&self, label: &str) -> Option<&ChartDataset> {
        self.datasets.iter().find(|d| d.label == label)
    }
}
