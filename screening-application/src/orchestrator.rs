use std::sync::Arc;

use screening_domain::ports::Detector;
use screening_domain::{standard_detectors, DetectionConfig, FlaggedSet, RuleId, Transaction};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Flagged(FlaggedSet),
    /// The detector faulted; the other rules are unaffected.
    Unavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
    pub rule: RuleId,
    pub outcome: RuleOutcome,
}

impl RuleReport {
    pub fn flagged(&self) -> Option<&FlaggedSet> {
        match &self.outcome {
            RuleOutcome::Flagged(set) => Some(set),
            RuleOutcome::Unavailable { .. } => None,
        }
    }
}

/// Per-rule results for one snapshot, in detector order.
#[derive(Debug, Clone)]
pub struct ScreeningReport {
    pub transactions: Arc<[Transaction]>,
    pub rules: Vec<RuleReport>,
}

impl ScreeningReport {
    pub fn rule(&self, rule: RuleId) -> Option<&RuleReport> {
        self.rules.iter().find(|report| report.rule == rule)
    }

    pub fn unavailable_rules(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.rules
            .iter()
            .filter(|report| report.flagged().is_none())
            .map(|report| report.rule)
    }
}

/// Runs every detector concurrently against one immutable snapshot.
pub struct RuleOrchestrator {
    detectors: Vec<Arc<dyn Detector>>,
}

impl RuleOrchestrator {
    pub fn new(config: &DetectionConfig) -> Self {
        Self::with_detectors(standard_detectors(config))
    }

    pub fn with_detectors(detectors: Vec<Arc<dyn Detector>>) -> Self {
        Self { detectors }
    }

    pub async fn run(&self, snapshot: Arc<[Transaction]>) -> Vec<RuleReport> {
        let handles: Vec<(RuleId, JoinHandle<FlaggedSet>)> = self
            .detectors
            .iter()
            .map(|detector| {
                let detector = Arc::clone(detector);
                let snapshot = Arc::clone(&snapshot);
                let rule = detector.rule();
                let handle = tokio::task::spawn_blocking(move || detector.detect(&snapshot));
                (rule, handle)
            })
            .collect();

        let mut reports = Vec::with_capacity(handles.len());
        for (rule, handle) in handles {
            let outcome = match handle.await {
                Ok(flagged) => {
                    debug!(rule = rule.code(), flagged = flagged.len(), "rule finished");
                    RuleOutcome::Flagged(flagged)
                }
                Err(err) => {
                    let reason = failure_reason(err);
                    warn!(rule = rule.code(), "rule unavailable: {}", reason);
                    RuleOutcome::Unavailable { reason }
                }
            };
            reports.push(RuleReport { rule, outcome });
        }
        reports
    }
}

fn failure_reason(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        return format!("detector panicked: {message}");
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return format!("detector panicked: {message}");
    }
    "detector panicked".to_string()
}
