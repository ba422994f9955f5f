use std::path::Path;
use std::sync::Arc;

use screening_domain::Transaction;
use tracing::{error, info};

use crate::{AppError, AppState, ScreeningReport};

pub async fn screen_file(state: &AppState, path: &Path) -> Result<ScreeningReport, AppError> {
    if path.as_os_str().is_empty() {
        return Err(AppError::BadRequest("input path is empty".to_string()));
    }
    let transactions = state.loader.load(path).await.map_err(|err| {
        error!("failed to load {}: {}", path.display(), err);
        AppError::Load(err)
    })?;
    info!(path = %path.display(), rows = transactions.len(), "loaded transactions");
    Ok(screen_transactions(state, transactions).await)
}

pub async fn screen_transactions(state: &AppState, transactions: Vec<Transaction>) -> ScreeningReport {
    let snapshot: Arc<[Transaction]> = transactions.into();
    let rules = state.orchestrator.run(Arc::clone(&snapshot)).await;
    let flagged: usize = rules
        .iter()
        .filter_map(|report| report.flagged())
        .map(|set| set.len())
        .sum();
    info!(rules = rules.len(), flagged, "screening finished");
    ScreeningReport {
        transactions: snapshot,
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;
    use screening_domain::ports::TransactionLoader;
    use screening_domain::{DetectionConfig, LoadError, RowId, RuleId};

    struct StaticLoader(Vec<Transaction>);

    #[async_trait]
    impl TransactionLoader for StaticLoader {
        async fn load(&self, _path: &Path) -> Result<Vec<Transaction>, LoadError> {
            Ok(self.0.clone())
        }
    }

    struct MissingColumnLoader;

    #[async_trait]
    impl TransactionLoader for MissingColumnLoader {
        async fn load(&self, _path: &Path) -> Result<Vec<Transaction>, LoadError> {
            Err(LoadError::MissingColumn("amount".to_string()))
        }
    }

    fn spike_rows() -> Vec<Transaction> {
        let base = NaiveDate::from_ymd_opt(2025, 9, 8)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .expect("base time");
        (0..5)
            .map(|i| {
                Transaction::new(
                    i,
                    "u1",
                    base + Duration::minutes(30 * i as i64),
                    "M1",
                    Decimal::new(10 * (i as i64 + 1), 0),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn screens_loaded_snapshot() {
        let state = AppState::new(&DetectionConfig::default(), Arc::new(StaticLoader(spike_rows())));
        let report = screen_file(&state, Path::new("dummy.csv")).await.expect("report");
        assert_eq!(report.transactions.len(), 5);
        let spikes = report
            .rule(RuleId::FrequencySpike)
            .and_then(|rule| rule.flagged())
            .expect("spike rule");
        let rows: Vec<RowId> = spikes.rows().collect();
        assert_eq!(rows, (0..5).map(RowId).collect::<Vec<_>>());
        assert_eq!(report.unavailable_rules().count(), 0);
    }

    #[tokio::test]
    async fn state_config_drives_detectors() {
        let config = DetectionConfig {
            high_value_threshold: Decimal::new(25, 0),
            ..DetectionConfig::default()
        };
        let state = AppState::new(&config, Arc::new(StaticLoader(spike_rows())));
        let report = screen_file(&state, Path::new("dummy.csv")).await.expect("report");
        let high_value = report
            .rule(RuleId::HighValue)
            .and_then(|rule| rule.flagged())
            .expect("high-value rule");
        let rows: Vec<RowId> = high_value.rows().collect();
        assert_eq!(rows, vec![RowId(2), RowId(3), RowId(4)]);
    }

    #[tokio::test]
    async fn load_failure_stops_screening() {
        let state = AppState::new(&DetectionConfig::default(), Arc::new(MissingColumnLoader));
        let err = screen_file(&state, Path::new("dummy.csv")).await.expect_err("load error");
        match err {
            AppError::Load(LoadError::MissingColumn(column)) => assert_eq!(column, "amount"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_path_is_rejected() {
        let state = AppState::new(&DetectionConfig::default(), Arc::new(StaticLoader(Vec::new())));
        let err = screen_file(&state, Path::new("")).await.expect_err("bad request");
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
