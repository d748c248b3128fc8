//! crudkit server
//!
//! Wires the crates together and serves a demo `customers` resource backed
//! by the in-memory persistence context.

mod customer;

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use crudkit_api::{AppState, build_app, build_router, crud_routes};
use crudkit_core::config::AppConfig;
use crudkit_core::error::AppError;
use crudkit_database::{GenericRepository, InMemoryContext};
use crudkit_entity::SimpleUuidGenerator;
use crudkit_service::{BaseService, BaseServiceImpl};

use crate::customer::Customer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("CRUDKIT_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env)?;

    init_logging(&config);

    run(config).await?;
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting crudkit v{}", env!("CARGO_PKG_VERSION"));

    let repository_config = &config.repository;
    let context = InMemoryContext::<Customer>::new(SimpleUuidGenerator)
        .with_strategy(repository_config.identity_strategy);
    let repository = GenericRepository::new(context)
        .with_match_policy(repository_config.match_policy)
        .with_max_page_size(repository_config.max_page_size);
    let customers: Arc<dyn BaseService<Customer>> =
        Arc::new(BaseServiceImpl::new(Arc::new(repository)));

    let routes = build_router(AppState::new(config.clone()))
        .nest("/api/customers", crud_routes(customers));
    let app = build_app(routes, &config);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("crudkit listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
