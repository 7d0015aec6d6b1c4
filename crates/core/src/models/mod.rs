pub mod chart;
pub mod history;
pub mod rates;
pub mod settings;
pub mod snapshot;
