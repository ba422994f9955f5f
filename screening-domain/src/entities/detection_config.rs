// Detection configuration
// Immutable rule parameters threaded into every detector

use chrono::Duration;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionConfig {
    /// Amounts strictly above this are flagged by the high-value rule.
    pub high_value_threshold: Decimal,
    pub rapid_count: usize,
    pub rapid_window: Duration,
    pub same_merchant_count: usize,
    pub same_merchant_window: Duration,
    /// Half-width of the normal hour band, in standard deviations.
    pub time_std_multiplier: f64,
    pub spike_window: Duration,
    pub spike_multiplier: f64,
    pub min_tx_in_window: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            high_value_threshold: Decimal::new(7000, 0),
            rapid_count: 5,
            rapid_window: Duration::minutes(2),
            same_merchant_count: 3,
            same_merchant_window: Duration::seconds(90),
            time_std_multiplier: 2.0,
            spike_window: Duration::hours(3),
            spike_multiplier: 2.0,
            min_tx_in_window: 3,
        }
    }
}
