use bloom_server::utils::init_logger_with_file;
use bloom_server::{Config, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        database = %config.database_path,
        "CoffeeBloom server starting"
    );
    if config.is_production() && config.cors_allow_origin == "*" {
        tracing::warn!("CORS allows any origin in production");
    }

    if let Err(e) = Server::new(config).run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
