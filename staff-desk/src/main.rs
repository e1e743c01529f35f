//! staff-desk binary

use anyhow::Context;
use clap::Parser;
use staff_desk::DeskConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = DeskConfig::parse();
    let _log_guard = staff_desk::init_logging(&config).context("Failed to initialize logging")?;

    staff_desk::run(config).await.context("staff-desk failed")?;
    Ok(())
}
