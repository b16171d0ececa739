//! `api-fanout` command line entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use api_fanout::bootstrap::Runtime;
use api_fanout::config::AppConfig;
use api_fanout::infrastructure::providers::RequestParams;
use api_fanout::telemetry::init_tracing;
use clap::Parser;

/// Call every registered API provider once and print the results.
#[derive(Parser, Debug)]
#[command(name = "api-fanout", version, about)]
struct Args {
    /// Settings file (TOML, JSON or YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Request parameters as a JSON object
    #[arg(long, default_value = "{}")]
    params: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args { config, params } = Args::parse();

    let config = AppConfig::load(config.as_deref()).context("loading settings")?;
    init_tracing(config.log_format);

    let params: RequestParams =
        serde_json::from_str(&params).context("--params must be a JSON object")?;

    let runtime = Runtime::build(&config).await?;
    let results = runtime
        .dispatcher
        .run_all(&runtime.client, &runtime.sink, params)
        .await;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
