use anyhow::Context;
use std::sync::Arc;
use tarantibot::{
    api::HttpAskService, config::load_config, exchange::ExchangeController,
    logging::init_logging, ui::run_ui,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = load_config().context("Failed to load configuration")?;
    let _logger = init_logging(&config.log_level, &config.log_dir)?;

    let service = HttpAskService::from_config(&config)?;
    log::info!(
        "Starting Tarantibot against {} ({} films in catalog)",
        service.endpoint(),
        config.catalog.len()
    );

    let controller = ExchangeController::new(Arc::new(service));
    run_ui(controller, config.catalog).await?;

    log::info!("Session ended");
    Ok(())
}
