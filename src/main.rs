use anyhow::Context;
use product_catalog::app::{
    self,
    product::{
        api::ProductsController, controller::ProductController, model::Product, seed_sample_data,
    },
};
use product_catalog::config::{load_config, Config, StorageBackend};
use product_catalog::core::repository::Repository;
use product_catalog::infrastructure::{logger::Logger, memory_repository::MemoryRepository};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    let _log_guard = Logger::init(&config.logging)?;

    info!("Starting product catalog server...");

    let repository = build_repository(&config).await?;

    if config.storage.seed_sample_data {
        seed_sample_data(repository.as_ref()).await?;
    }

    let web = ProductController::new(repository.clone());
    let api = ProductsController::new(repository.clone());
    let app = app::router(web, api, repository, &config.http);

    let listener = TcpListener::bind((config.http.bind_address.as_str(), config.http.port))
        .await
        .with_context(|| {
            format!(
                "failed to bind {}:{}",
                config.http.bind_address, config.http.port
            )
        })?;
    let addr = listener.local_addr()?;

    info!("🚀 Product catalog running on http://{}", addr);
    info!("   GET    /Product                 - HTML product list");
    info!("   GET    /products                - List products (JSON)");
    info!("   POST   /products                - Create product");
    info!("   GET    /products/:id            - Get product");
    info!("   PUT    /products/:id            - Update product");
    info!("   DELETE /products/:id            - Delete product");
    info!("   GET    /health                  - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn Repository<Product>>> {
    info!("Storage backend: {}", config.storage.backend.as_str());

    match config.storage.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryRepository::<Product>::new())),
        StorageBackend::Postgres => postgres_repository(config).await,
    }
}

#[cfg(feature = "database")]
async fn postgres_repository(config: &Config) -> anyhow::Result<Arc<dyn Repository<Product>>> {
    use product_catalog::infrastructure::{database::DatabaseManager, pg_repository::PgRepository};

    let database = DatabaseManager::new(&config.database)
        .await
        .context("failed to connect to database")?;
    database.ensure_schema().await?;

    Ok(Arc::new(PgRepository::<Product>::new(
        database.get_pool().clone(),
    )))
}

#[cfg(not(feature = "database"))]
async fn postgres_repository(_config: &Config) -> anyhow::Result<Arc<dyn Repository<Product>>> {
    anyhow::bail!("postgres backend requires the `database` feature")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
