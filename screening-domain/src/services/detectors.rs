use std::sync::Arc;

use crate::entities::DetectionConfig;
use crate::ports::Detector;
use crate::services::{
    BurstCountDetector, FrequencySpikeDetector, SameKeyBurstDetector, ThresholdDetector,
    TimeOfDayOutlierDetector,
};

/// The five screening rules, in rule order, parameterized by `config`.
pub fn standard_detectors(config: &DetectionConfig) -> Vec<Arc<dyn Detector>> {
    vec![
        Arc::new(ThresholdDetector::from_config(config)),
        Arc::new(BurstCountDetector::from_config(config)),
        Arc::new(SameKeyBurstDetector::from_config(config)),
        Arc::new(TimeOfDayOutlierDetector::from_config(config)),
        Arc::new(FrequencySpikeDetector::from_config(config)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::RuleId;

    #[test]
    fn standard_set_covers_every_rule_once() {
        let rules: Vec<RuleId> = standard_detectors(&DetectionConfig::default())
            .iter()
            .map(|detector| detector.rule())
            .collect();
        assert_eq!(rules, RuleId::ALL.to_vec());
    }
}
