use rust_decimal::Decimal;

use crate::entities::{DetectionConfig, FlaggedSet, Transaction};
use crate::ports::Detector;
use crate::value_objects::RuleId;

/// Rule 1: amount strictly above a fixed threshold.
#[derive(Debug, Clone)]
pub struct ThresholdDetector {
    threshold: Decimal,
}

impl ThresholdDetector {
    pub fn new(threshold: Decimal) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.high_value_threshold)
    }
}

impl Detector for ThresholdDetector {
    fn rule(&self) -> RuleId {
        RuleId::HighValue
    }

    fn detect(&self, transactions: &[Transaction]) -> FlaggedSet {
        let mut flagged = FlaggedSet::new(self.rule());
        flagged.extend(
            transactions
                .iter()
                .filter(|transaction| transaction.amount > self.threshold)
                .map(|transaction| transaction.row),
        );
        flagged
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::services::test_support::tx;
    use crate::value_objects::RowId;

    fn with_amount(row: usize, amount: Decimal) -> Transaction {
        let mut transaction = tx(row, "u1", "Rolex Boutique", Duration::hours(row as i64));
        transaction.amount = amount;
        transaction
    }

    #[test]
    fn amounts_above_threshold_are_flagged() {
        let transactions = vec![
            with_amount(0, Decimal::new(8000, 0)),
            with_amount(1, Decimal::new(12000, 0)),
            with_amount(2, Decimal::new(50, 0)),
        ];
        let flagged = ThresholdDetector::from_config(&DetectionConfig::default()).detect(&transactions);
        let rows: Vec<RowId> = flagged.rows().collect();
        assert_eq!(rows, vec![RowId(0), RowId(1)]);
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        let transactions = vec![
            with_amount(0, Decimal::new(7000, 0)),
            with_amount(1, Decimal::new(700001, 2)),
        ];
        let flagged = ThresholdDetector::new(Decimal::new(7000, 0)).detect(&transactions);
        assert!(!flagged.contains(RowId(0)));
        assert!(flagged.contains(RowId(1)));
        assert_eq!(flagged.len(), 1);
    }

    #[test]
    fn empty_input_flags_nothing() {
        let flagged = ThresholdDetector::new(Decimal::ZERO).detect(&[]);
        assert!(flagged.is_empty());
        assert_eq!(flagged.rule(), RuleId::HighValue);
    }
}
