use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use dealdesk_backend::app;
use dealdesk_backend::config::{AppConfig, StoreKind};
use dealdesk_backend::logging::{self, LoggingConfig};
use dealdesk_backend::state::AppState;
use dealdesk_backend::store::{DealStore, InMemoryDealStore, PgDealStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init_logging(&LoggingConfig::from_env()?)?;
    let config = AppConfig::from_env()?;

    let store: Arc<dyn DealStore> = match config.store {
        StoreKind::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is not set")?;
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await
                .context("Failed to connect to Postgres")?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Using Postgres deal store");
            Arc::new(PgDealStore::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory deal store, data is lost on shutdown");
            Arc::new(InMemoryDealStore::new())
        }
    };

    let app = app::create_app(AppState::new(store));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Deal desk backend running at http://{}/", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
