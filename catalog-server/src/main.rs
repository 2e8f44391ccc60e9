use anyhow::Result;
use core_runtime::config::ServiceConfig;
use core_runtime::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the process environment still applies.
    dotenvy::dotenv().ok();

    let config = ServiceConfig::from_env()?;
    init_logging(config.logging.clone())?;

    catalog_server::run(config).await
}
