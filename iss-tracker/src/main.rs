use iss_tracker::config::TrackerConfig;
use iss_tracker::http::ReqwestHttpClient;
use iss_tracker::pipeline::PassPipeline;
use iss_tracker::report::format_pass_times;

use anyhow::{Context, Result};
use std::sync::Arc;

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const GEO_API_KEY_ENV: &str = "ISS_GEO_API_KEY";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let mut config = TrackerConfig::load(&config_path)?;
    if let Ok(key) = std::env::var(GEO_API_KEY_ENV) {
        config.endpoints.geo_api_key = key;
    }

    // Initialize logging
    let _logging_guard = iss_tracker::logging::init_logging(
        &config.log_dir,
        "iss-tracker",
        &config.log_level,
        config.log_retention(),
    )?;

    if config.endpoints.geo_api_key.is_empty() {
        tracing::warn!(
            "No geo API key configured (set endpoints.geo_api_key or {})",
            GEO_API_KEY_ENV
        );
    }

    let client = ReqwestHttpClient::from_config(&config).context("Failed to build HTTP client")?;
    let pipeline = PassPipeline::new(Arc::new(client), &config.endpoints);

    match pipeline.next_passes_for_current_location().await {
        Ok(passes) => {
            for line in format_pass_times(&passes) {
                println!("{}", line);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to fetch ISS pass times: {}", e);
            eprintln!("It didn't work!");
            Err(e.into())
        }
    }
}
