use std::collections::BTreeMap;

use chrono::Duration;

use crate::entities::{DetectionConfig, FlaggedSet, Transaction};
use crate::ports::Detector;
use crate::services::grouping::{by_user, by_user_and_merchant};
use crate::services::window::dense_window_rows;
use crate::value_objects::RuleId;

/// Rule 2: at least `min_count` transactions by one user within `window`.
#[derive(Debug, Clone)]
pub struct BurstCountDetector {
    window: Duration,
    min_count: usize,
}

impl BurstCountDetector {
    pub fn new(window: Duration, min_count: usize) -> Self {
        Self { window, min_count }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.rapid_window, config.rapid_count)
    }
}

impl Detector for BurstCountDetector {
    fn rule(&self) -> RuleId {
        RuleId::RapidBurst
    }

    fn detect(&self, transactions: &[Transaction]) -> FlaggedSet {
        flag_groups(self.rule(), by_user(transactions), self.window, self.min_count)
    }
}

/// Rule 3: at least `min_count` transactions by one user at one merchant within `window`.
#[derive(Debug, Clone)]
pub struct SameKeyBurstDetector {
    window: Duration,
    min_count: usize,
}

impl SameKeyBurstDetector {
    pub fn new(window: Duration, min_count: usize) -> Self {
        Self { window, min_count }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.same_merchant_window, config.same_merchant_count)
    }
}

impl Detector for SameKeyBurstDetector {
    fn rule(&self) -> RuleId {
        RuleId::SameMerchantBurst
    }

    fn detect(&self, transactions: &[Transaction]) -> FlaggedSet {
        flag_groups(
            self.rule(),
            by_user_and_merchant(transactions),
            self.window,
            self.min_count,
        )
    }
}

fn flag_groups<K>(
    rule: RuleId,
    groups: BTreeMap<K, Vec<&Transaction>>,
    window: Duration,
    min_count: usize,
) -> FlaggedSet {
    let mut flagged = FlaggedSet::new(rule);
    for group in groups.values() {
        flagged.extend(dense_window_rows(group, window, min_count));
    }
    flagged
}
