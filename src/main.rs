mod analyzer;
mod budget;
mod config;
mod fallback;
mod journal;

use std::path::Path;

use analyzer::Analyzer;
use anyhow::{Context, Result};
use common::AnalysisRequest;
use config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let request_path = args
        .next()
        .context("usage: etsmart-analyzer <request.json> [config.toml]")?;
    let config_path = args.next().unwrap_or_else(|| "config.toml".to_string());

    let config = if Path::new(&config_path).exists() {
        AppConfig::load(&config_path)?
    } else {
        info!("No config file at {}; using defaults", config_path);
        AppConfig::default()
    };
    info!("Loaded configuration: {:?}", config);

    let raw = std::fs::read_to_string(&request_path)
        .with_context(|| format!("Failed to read request file {}", request_path))?;
    let request: AnalysisRequest = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid analysis request in {}", request_path))?;

    let mut analyzer = Analyzer::new(config)?;
    let result = analyzer.analyze(&request).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
