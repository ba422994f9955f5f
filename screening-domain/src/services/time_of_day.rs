use chrono::Timelike;
use tracing::trace;

use crate::entities::{DetectionConfig, FlaggedSet, Transaction};
use crate::ports::Detector;
use crate::services::grouping::by_user;
use crate::utils::HourMoments;
use crate::value_objects::RuleId;

const MIN_HISTORY: usize = 2;

/// Rule 4: hour-of-day far from the user's own mean hour.
///
/// Hours are whole numbers, so 08:59 and 08:01 both count as hour 8. The
/// normal band is `mean ± multiplier * std` using the population standard
/// deviation; anything strictly outside it is flagged, a row on the edge is
/// not. Users with a single transaction have no band and are skipped.
#[derive(Debug, Clone)]
pub struct TimeOfDayOutlierDetector {
    std_multiplier: f64,
}

impl TimeOfDayOutlierDetector {
    pub fn new(std_multiplier: f64) -> Self {
        Self { std_multiplier }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.time_std_multiplier)
    }
}

impl Detector for TimeOfDayOutlierDetector {
    fn rule(&self) -> RuleId {
        RuleId::UnusualHour
    }

    fn detect(&self, transactions: &[Transaction]) -> FlaggedSet {
        let mut flagged = FlaggedSet::new(self.rule());
        for (user_id, group) in by_user(transactions) {
            if group.len() < MIN_HISTORY {
                trace!(user_id, rows = group.len(), "skipping hour check, not enough history");
                continue;
            }
            let moments = HourMoments::from_hours(
                group.iter().map(|transaction| transaction.timestamp.hour()),
            );
            for transaction in group {
                let hour = transaction.timestamp.hour();
                if moments.is_outside_band(hour, self.std_multiplier) {
                    flagged.insert_with_hour(transaction.row, hour);
                }
            }
        }
        flagged
    }
}
