// Rule identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    HighValue,
    RapidBurst,
    SameMerchantBurst,
    UnusualHour,
    FrequencySpike,
}

impl RuleId {
    pub const ALL: [RuleId; 5] = [
        RuleId::HighValue,
        RuleId::RapidBurst,
        RuleId::SameMerchantBurst,
        RuleId::UnusualHour,
        RuleId::FrequencySpike,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            RuleId::HighValue => "R1",
            RuleId::RapidBurst => "R2",
            RuleId::SameMerchantBurst => "R3",
            RuleId::UnusualHour => "R4",
            RuleId::FrequencySpike => "R5",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::HighValue => "high_value",
            RuleId::RapidBurst => "rapid_burst",
            RuleId::SameMerchantBurst => "same_merchant_burst",
            RuleId::UnusualHour => "unusual_hour",
            RuleId::FrequencySpike => "frequency_spike",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RuleId::HighValue => "High-value transactions",
            RuleId::RapidBurst => "Rapid small transactions",
            RuleId::SameMerchantBurst => "Same-merchant transactions",
            RuleId::UnusualHour => "Unusual time transactions",
            RuleId::FrequencySpike => "High-frequency transactions",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.as_str())
    }
}
