use std::path::PathBuf;

use anyhow::Result;
use tracing::warn;

use screening_application::commands::screen_file;
use screening_infrastructure::ReportFormat;

use crate::context::AppContext;

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Overrides `input_path` from the config.
    pub input: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub format: ReportFormat,
}

/// Loads config and input, runs every rule, and returns the rendered report.
pub async fn run(options: RunOptions) -> Result<String> {
    let context = AppContext::new(options.config.as_deref()).await?;
    let input = options
        .input
        .unwrap_or_else(|| PathBuf::from(&context.config.input_path));

    let report = screen_file(&context.state, &input).await?;
    for rule in report.unavailable_rules() {
        warn!(rule = rule.code(), "rule unavailable, report is partial");
    }
    options.format.render(&report, &input.display().to_string())
}
