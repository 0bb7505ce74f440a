use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotwise_api::config::ApiConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Start API server
    slotwise_api::start_server(config).await?;

    Ok(())
}
