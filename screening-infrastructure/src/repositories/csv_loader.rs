use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::FixedOffset;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use tokio::fs;
use tracing::debug;

use screening_domain::{LoadError, Transaction, TransactionLoader};

use crate::utils::parse_timestamp;

pub const REQUIRED_COLUMNS: [&str; 4] = ["user_id", "timestamp", "merchant_name", "amount"];

/// Loads transactions from a CSV file with a header row.
///
/// Column order is free and extra columns are ignored. Any bad timestamp or
/// amount rejects the whole file, as does a file whose timestamps do not all
/// share one UTC offset.
pub struct CsvTransactionLoader;

impl CsvTransactionLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn parse<R: Read>(input: R) -> Result<Vec<Transaction>, LoadError> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
        let headers = reader.headers().map_err(malformed)?.clone();
        let columns = ColumnIndex::resolve(&headers)?;

        let mut transactions = Vec::new();
        let mut batch_offset: Option<Option<FixedOffset>> = None;
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(malformed)?;
            let (transaction, offset) = columns.transaction(row, &record)?;
            match batch_offset {
                None => batch_offset = Some(offset),
                Some(expected) if expected != offset => {
                    return Err(LoadError::MixedOffsets {
                        row,
                        value: record.get(columns.timestamp).unwrap_or_default().to_string(),
                    });
                }
                Some(_) => {}
            }
            transactions.push(transaction);
        }
        debug!(rows = transactions.len(), "parsed transaction csv");
        Ok(transactions)
    }
}

impl Default for CsvTransactionLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionLoader for CsvTransactionLoader {
    async fn load(&self, path: &Path) -> Result<Vec<Transaction>, LoadError> {
        let content = fs::read(path).await?;
        Self::parse(content.as_slice())
    }
}

struct ColumnIndex {
    user_id: usize,
    timestamp: usize,
    merchant_name: usize,
    amount: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };
        let [user_id, timestamp, merchant_name, amount] = REQUIRED_COLUMNS;
        Ok(Self {
            user_id: position(user_id)?,
            timestamp: position(timestamp)?,
            merchant_name: position(merchant_name)?,
            amount: position(amount)?,
        })
    }

    fn transaction(
        &self,
        row: usize,
        record: &StringRecord,
    ) -> Result<(Transaction, Option<FixedOffset>), LoadError> {
        let field = |index: usize| record.get(index).unwrap_or_default();

        let raw_timestamp = field(self.timestamp);
        let parsed = parse_timestamp(raw_timestamp).ok_or_else(|| LoadError::UnparsableTimestamp {
            row,
            value: raw_timestamp.to_string(),
        })?;

        let raw_amount = field(self.amount);
        let amount = parse_amount(raw_amount).ok_or_else(|| LoadError::InvalidAmount {
            row,
            value: raw_amount.to_string(),
        })?;

        let transaction = Transaction::new(
            row,
            field(self.user_id),
            parsed.wall_clock,
            field(self.merchant_name),
            amount,
        );
        Ok((transaction, parsed.offset))
    }
}

fn parse_amount(value: &str) -> Option<Decimal> {
    let amount = Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return None;
    }
    Some(amount)
}

fn malformed(err: csv::Error) -> LoadError {
    LoadError::Malformed(err.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use screening_domain::RowId;
    use tempfile::NamedTempFile;

    use super::*;

    const SAMPLE: &str = "user_id,timestamp,merchant_name,amount
u1,2025-01-01 10:00:00,Rolex Boutique,8000
u2,2025-01-02 12:00:00,Jewellery World,12000.50
u3,2025-01-03 15:00:00,Walmart,50
";

    #[test]
    fn parses_rows_in_input_order() {
        let transactions = CsvTransactionLoader::parse(SAMPLE.as_bytes()).expect("parse");
        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions[0].row, RowId(0));
        assert_eq!(transactions[1].user_id, "u2");
        assert_eq!(transactions[1].merchant_name, "Jewellery World");
        assert_eq!(transactions[1].amount, Decimal::new(1200050, 2));
        assert_eq!(transactions[2].row, RowId(2));
    }

    #[test]
    fn column_order_is_free_and_extra_columns_ignored() {
        let input = "amount,note,merchant_name,user_id,timestamp
42.10,hello,Target,u9,2025-01-04 16:00:00
";
        let transactions = CsvTransactionLoader::parse(input.as_bytes()).expect("parse");
        assert_eq!(transactions[0].user_id, "u9");
        assert_eq!(transactions[0].amount, Decimal::new(4210, 2));
    }

    #[test]
    fn fields_are_trimmed() {
        let input = "user_id,timestamp,merchant_name,amount
  u1 , 2025-01-01 10:00:00 , Starbucks ,  5.25
";
        let transactions = CsvTransactionLoader::parse(input.as_bytes()).expect("parse");
        assert_eq!(transactions[0].user_id, "u1");
        assert_eq!(transactions[0].merchant_name, "Starbucks");
    }

    #[test]
    fn missing_column_rejects_batch() {
        let input = "user_id,timestamp,amount
u1,2025-01-01 10:00:00,10
";
        match CsvTransactionLoader::parse(input.as_bytes()) {
            Err(LoadError::MissingColumn(column)) => assert_eq!(column, "merchant_name"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unparsable_timestamp_rejects_batch() {
        let input = "user_id,timestamp,merchant_name,amount
u1,2025-01-01 10:00:00,A,10
u1,yesterday,A,10
";
        match CsvTransactionLoader::parse(input.as_bytes()) {
            Err(LoadError::UnparsableTimestamp { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn mixed_offsets_reject_batch() {
        let input = "user_id,timestamp,merchant_name,amount
u1,2025-01-01T10:00:00+00:00,A,10
u1,2025-01-01T10:00:00+05:00,A,10
";
        match CsvTransactionLoader::parse(input.as_bytes()) {
            Err(LoadError::MixedOffsets { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "2025-01-01T10:00:00+05:00");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn naive_and_offset_timestamps_do_not_mix() {
        let input = "user_id,timestamp,merchant_name,amount
u1,2025-01-01 10:00:00,A,10
u1,2025-01-01T10:00:00Z,A,10
";
        assert!(matches!(
            CsvTransactionLoader::parse(input.as_bytes()),
            Err(LoadError::MixedOffsets { row: 1, .. })
        ));
    }

    #[test]
    fn shared_offset_keeps_wall_clock_spacing() {
        let input = "user_id,timestamp,merchant_name,amount
u1,2025-01-01T10:00:00+05:00,A,10
u1,2025-01-01T10:01:30+05:00,A,10
";
        let transactions = CsvTransactionLoader::parse(input.as_bytes()).expect("parse");
        let gap = transactions[1].timestamp - transactions[0].timestamp;
        assert_eq!(gap.num_seconds(), 90);
    }

    #[test]
    fn negative_or_non_numeric_amount_rejects_batch() {
        let negative = "user_id,timestamp,merchant_name,amount
u1,2025-01-01 10:00:00,A,-5
";
        assert!(matches!(
            CsvTransactionLoader::parse(negative.as_bytes()),
            Err(LoadError::InvalidAmount { row: 0, .. })
        ));
        let text = "user_id,timestamp,merchant_name,amount
u1,2025-01-01 10:00:00,A,ten
";
        assert!(matches!(
            CsvTransactionLoader::parse(text.as_bytes()),
            Err(LoadError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let input = "user_id,timestamp,merchant_name,amount
u1,2025-01-01 10:00:00,A
";
        assert!(matches!(
            CsvTransactionLoader::parse(input.as_bytes()),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn header_only_input_is_empty() {
        let input = "user_id,timestamp,merchant_name,amount\n";
        let transactions = CsvTransactionLoader::parse(input.as_bytes()).expect("parse");
        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "{}", SAMPLE).expect("write");
        let transactions = CsvTransactionLoader::new()
            .load(file.path())
            .await
            .expect("load");
        assert_eq!(transactions.len(), 3);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let result = CsvTransactionLoader::new()
            .load(Path::new("/nonexistent/txscreen/input.csv"))
            .await;
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
