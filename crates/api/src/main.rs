//! Cohort Dashboard - Main Entry Point

use api::{init_logging, run_server, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    init_logging(&settings.logging)?;

    info!("=== Cohort Dashboard v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Records: {}", settings.data.records_path);

    run_server(settings).await?;

    Ok(())
}
