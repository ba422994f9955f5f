use chrono::Duration;
use tracing::trace;

use crate::entities::{DetectionConfig, FlaggedSet, Transaction};
use crate::ports::Detector;
use crate::services::grouping::by_user;
use crate::services::window::dense_window_rows;
use crate::utils::fractional_hours;
use crate::value_objects::RuleId;

const MIN_SPAN_HOURS: f64 = 1.0;

/// Rule 5: a window holding far more transactions than the user's baseline rate.
///
/// The baseline is `count / span_hours` over the user's whole history (span
/// floored at one hour), spike rows included. The per-user count threshold is
/// `max(min_tx_in_window, multiplier * baseline)`.
#[derive(Debug, Clone)]
pub struct FrequencySpikeDetector {
    window: Duration,
    multiplier: f64,
    min_tx_in_window: usize,
}

impl FrequencySpikeDetector {
    pub fn new(window: Duration, multiplier: f64, min_tx_in_window: usize) -> Self {
        Self {
            window,
            multiplier,
            min_tx_in_window,
        }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(
            config.spike_window,
            config.spike_multiplier,
            config.min_tx_in_window,
        )
    }

    /// Minimum window count for a group of `count` rows spanning `span`.
    pub fn dynamic_threshold(&self, count: usize, span: Duration) -> usize {
        let span_hours = fractional_hours(span).max(MIN_SPAN_HOURS);
        let baseline_rate = count as f64 / span_hours;
        let threshold = (self.min_tx_in_window as f64).max(self.multiplier * baseline_rate);
        // count >= threshold holds exactly when count >= ceil(threshold)
        threshold.ceil() as usize
    }
}

impl Detector for FrequencySpikeDetector {
    fn rule(&self) -> RuleId {
        RuleId::FrequencySpike
    }

    fn detect(&self, transactions: &[Transaction]) -> FlaggedSet {
        let mut flagged = FlaggedSet::new(self.rule());
        for (user_id, group) in by_user(transactions) {
            if group.len() < self.min_tx_in_window {
                trace!(user_id, rows = group.len(), "skipping spike check, not enough history");
                continue;
            }
            let (Some(first), Some(last)) = (group.first(), group.last()) else {
                continue;
            };
            let min_count = self.dynamic_threshold(group.len(), last.timestamp - first.timestamp);
            trace!(user_id, min_count, "spike threshold");
            flagged.extend(dense_window_rows(&group, self.window, min_count));
        }
        flagged
    }
}
