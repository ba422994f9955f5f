// Transaction entity
// One row of the screened batch

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::RowId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub row: RowId,
    pub user_id: String,
    pub timestamp: NaiveDateTime,
    pub merchant_name: String,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(
        row: usize,
        user_id: impl Into<String>,
        timestamp: NaiveDateTime,
        merchant_name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            row: RowId(row),
            user_id: user_id.into(),
            timestamp,
            merchant_name: merchant_name.into(),
            amount,
        }
    }
}
