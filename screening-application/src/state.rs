use std::sync::Arc;

use screening_domain::ports::TransactionLoader;
use screening_domain::DetectionConfig;

use crate::RuleOrchestrator;

#[derive(Clone)]
pub struct AppState {
    pub loader: Arc<dyn TransactionLoader>,
    pub orchestrator: Arc<RuleOrchestrator>,
}

impl AppState {
    pub fn new(config: &DetectionConfig, loader: Arc<dyn TransactionLoader>) -> Self {
        Self {
            loader,
            orchestrator: Arc::new(RuleOrchestrator::new(config)),
        }
    }
}
