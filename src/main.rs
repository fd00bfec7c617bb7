mod application;
mod config;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::infrastructure::container::AppContainer;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let container = match AppContainer::new(&config) {
        Ok(container) => Arc::new(container),
        Err(e) => {
            error!("Startup error: {}", e);
            std::process::exit(1);
        }
    };

    let worker = container.ingestion_worker.clone();
    tokio::spawn(async move {
        worker.start().await;
    });

    presentation::http::server::run(container, &config).await;
}
