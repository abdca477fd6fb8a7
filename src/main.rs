use anyhow::Result;
use catalog::config::AppConfig;
use catalog::server::ServerBuilder;
use catalog::storage::Stores;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CATALOG_CONFIG").ok());
    let config = AppConfig::load(path.as_deref())?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        config = path.as_deref().unwrap_or("<defaults>"),
        backend = config.storage.backend_name(),
        "starting course-catalog"
    );

    let stores = Stores::open(&config.storage).await?;

    let result = ServerBuilder::new()
        .with_config(config)
        .with_stores(&stores)
        .serve()
        .await;

    stores.close().await;
    result
}
