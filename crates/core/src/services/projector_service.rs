use chrono::{DateTime, Utc};

use crate::models::history::{last_two, HistoryEntry};
use crate::models::snapshot::Snapshot;
use crate::services::chart_service::ChartService;
use crate::timestamp;

/// Derives the served snapshot from the full history.
///
/// Latest values come from the final entry and the Binance movement is
/// measured against the entry before it (or the final entry itself when
/// there is only one). The projection is recomputed on every read.
pub struct ProjectorService {
    chart_service: ChartService,
}

impl ProjectorService {
    pub fn new() -> Self {
        Self {
            chart_service: ChartService::new(),
        }
    }

    /// Compute the snapshot for `history` as of `now`.
    ///
    /// `previous` is the snapshot currently being served. When the
    /// previous Binance rate is not positive, the diff and percent are
    /// carried over from it unchanged instead of being recomputed.
    pub fn project(
        &self,
        previous: &Snapshot,
        history: &[HistoryEntry],
        now: DateTime<Utc>,
    ) -> Snapshot {
        let chart_data = self.chart_service.build_chart(history);

        let (bcv, bcv_eur, binance, binance_prev) = match last_two(history) {
            Some((last, prev)) => (last.bcv, last.bcv_eur, last.binance, prev.binance),
            None => (0.0, 0.0, 0.0, 0.0),
        };

        let (binance_diff, binance_percent) = if binance_prev > 0.0 {
            let diff = binance - binance_prev;
            (diff, diff / binance_prev * 100.0)
        } else {
            (previous.binance_diff, previous.binance_percent)
        };

        Snapshot {
            bcv,
            bcv_eur,
            binance,
            binance_prev,
            binance_diff,
            binance_percent,
            chart_data,
            last_updated: Some(timestamp::format_instant(now)),
        }
    }
}

impl Default for ProjectorService {
    fn default() -> Self {
        Self::new()
    }
}
