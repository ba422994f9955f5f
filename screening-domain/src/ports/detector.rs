use crate::entities::{FlaggedSet, Transaction};
use crate::value_objects::RuleId;

/// A single screening rule.
///
/// `detect` must be pure: same snapshot in, same flagged set out.
pub trait Detector: Send + Sync {
    fn rule(&self) -> RuleId;
    fn detect(&self, transactions: &[Transaction]) -> FlaggedSet;
}
