use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use screening_application::AppState;
use screening_infrastructure::{AppConfig, CsvTransactionLoader};

pub struct AppContext {
    pub config: AppConfig,
    pub state: AppState,
}

impl AppContext {
    pub async fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => AppConfig::load_from(path).await?,
            None => AppConfig::load().await?,
        };
        let detection = config.to_detection_config()?;
        info!(?detection, "detection parameters");

        let state = AppState::new(&detection, Arc::new(CsvTransactionLoader::new()));
        Ok(Self { config, state })
    }
}
