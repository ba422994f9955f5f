use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use screening_bootstrap::RunOptions;
use screening_infrastructure::ReportFormat;

#[derive(Parser, Debug)]
#[command(name = "txscreen")]
#[command(about = "Screen a batch of transactions against the fraud rules", long_about = None)]
struct Args {
    /// Path to the transactions CSV (defaults to input_path from the config)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format: text or json
    #[arg(long, default_value = "text")]
    format: ReportFormat,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs);

    let output = screening_bootstrap::run(RunOptions {
        input: args.file,
        config: args.config,
        format: args.format,
    })
    .await?;
    println!("{}", output);
    Ok(())
}
