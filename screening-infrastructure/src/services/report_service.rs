use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};

use screening_application::{RuleOutcome, RuleReport, ScreeningReport};
use screening_domain::{FlaggedSet, RowId, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{}'", other)),
        }
    }
}

impl ReportFormat {
    pub fn render(&self, report: &ScreeningReport, source: &str) -> anyhow::Result<String> {
        match self {
            ReportFormat::Text => Ok(TextReport { report, source }.to_string()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(&json_report(report, source))?),
        }
    }
}

/// Plain-text rendering: one section per rule with its count and rows.
pub struct TextReport<'a> {
    pub report: &'a ScreeningReport,
    pub source: &'a str,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processing file: {}", self.source)?;
        writeln!(f, "Transactions screened: {}", self.report.transactions.len())?;
        let rows = index_rows(&self.report.transactions);
        for (position, rule_report) in self.report.rules.iter().enumerate() {
            writeln!(f)?;
            let rule = rule_report.rule;
            match &rule_report.outcome {
                RuleOutcome::Unavailable { reason } => {
                    writeln!(f, "Rule {} - {}: unavailable ({})", position + 1, rule.title(), reason)?;
                }
                RuleOutcome::Flagged(flagged) => {
                    writeln!(f, "Rule {} - {}: {} flagged", position + 1, rule.title(), flagged.len())?;
                    if flagged.is_empty() {
                        continue;
                    }
                    write_rows(f, flagged, &rows)?;
                }
            }
        }
        Ok(())
    }
}

fn write_rows(
    f: &mut fmt::Formatter<'_>,
    flagged: &FlaggedSet,
    rows: &HashMap<RowId, &Transaction>,
) -> fmt::Result {
    writeln!(
        f,
        "  {:>5}  {:<10}  {:<19}  {:<20}  {:>12}",
        "row", "user_id", "timestamp", "merchant_name", "amount"
    )?;
    for row in flagged.rows() {
        let Some(transaction) = rows.get(&row) else {
            continue;
        };
        write!(
            f,
            "  {:>5}  {:<10}  {:<19}  {:<20}  {:>12}",
            row,
            transaction.user_id,
            transaction.timestamp.format("%Y-%m-%d %H:%M:%S"),
            transaction.merchant_name,
            transaction.amount
        )?;
        if let Some(hour) = flagged.hour_of(row) {
            write!(f, "  hour={}", hour)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

fn json_report(report: &ScreeningReport, source: &str) -> Value {
    let rows = index_rows(&report.transactions);
    let rules: Vec<Value> = report
        .rules
        .iter()
        .map(|rule_report| json_rule(rule_report, &rows))
        .collect();
    json!({
        "source": source,
        "transactions": report.transactions.len(),
        "rules": rules,
    })
}

fn json_rule(rule_report: &RuleReport, rows: &HashMap<RowId, &Transaction>) -> Value {
    let rule = rule_report.rule;
    match &rule_report.outcome {
        RuleOutcome::Unavailable { reason } => json!({
            "rule": rule.code(),
            "name": rule.as_str(),
            "title": rule.title(),
            "status": "unavailable",
            "reason": reason,
        }),
        RuleOutcome::Flagged(flagged) => {
            let entries: Vec<Value> = flagged
                .rows()
                .filter_map(|row| rows.get(&row).map(|transaction| (row, *transaction)))
                .map(|(row, transaction)| {
                    let mut entry = json!({
                        "row": row,
                        "user_id": transaction.user_id,
                        "timestamp": transaction.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                        "merchant_name": transaction.merchant_name,
                        "amount": transaction.amount.to_string(),
                    });
                    if let (Some(hour), Some(object)) = (flagged.hour_of(row), entry.as_object_mut()) {
                        object.insert("hour".to_string(), json!(hour));
                    }
                    entry
                })
                .collect();
            json!({
                "rule": rule.code(),
                "name": rule.as_str(),
                "title": rule.title(),
                "status": "ok",
                "flagged_count": flagged.len(),
                "flagged": entries,
            })
        }
    }
}

fn index_rows(transactions: &[Transaction]) -> HashMap<RowId, &Transaction> {
    transactions
        .iter()
        .map(|transaction| (transaction.row, transaction))
        .collect()
}
