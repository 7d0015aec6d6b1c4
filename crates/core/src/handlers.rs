//! Transport-agnostic request handlers.
//!
//! Whatever hosts the tracker (a worker runtime, an HTTP server, a cron
//! binary) routes its scheduled trigger to [`scheduled`] and its read
//! endpoint to [`rates`], then serializes the returned body.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::CoreError;
use crate::models::snapshot::Snapshot;
use crate::RatesTracker;

/// Body returned to the scheduled trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CronResponse {
    Ok,
    Skipped { reason: String },
}

/// Scheduled trigger: run one aggregator pass.
///
/// `tracker` is `None` when the trigger fires outside a runtime that has
/// the store bound; the run is then skipped.
pub async fn scheduled(tracker: Option<&RatesTracker>) -> CronResponse {
    match tracker {
        Some(tracker) => {
            tracker.update_and_store_rates().await;
            CronResponse::Ok
        }
        None => {
            warn!("Scheduled trigger fired without a runtime context");
            CronResponse::Skipped {
                reason: "Runtime context not available".to_string(),
            }
        }
    }
}

/// Read endpoint: refresh the snapshot from storage and return it.
pub async fn rates(tracker: &RatesTracker) -> Snapshot {
    tracker.load_rates_from_storage().await;
    tracker.get_rates()
}

/// Serialize a handler body as JSON.
pub fn to_json_body<T: Serialize>(body: &T) -> Result<String, CoreError> {
    serde_json::to_string(body)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize response body: {e}")))
}
