//! # Veiculos API
//!
//! ## Quick Start
//!
//! ```bash
//! # JWT_SECRET is mandatory (>= 32 bytes)
//! JWT_SECRET=$(openssl rand -hex 32) veiculos-api
//!
//! # Custom database and port, with a bootstrap Adm account
//! veiculos-api --database frota.db --port 8080 \
//!   --seed-admin-email administrador@teste.com --seed-admin-password 123456
//!
//! # In-memory mode (for testing)
//! veiculos-api --memory
//! ```
//!
//! ## API Usage
//!
//! ```bash
//! curl -X POST http://localhost:3000/veiculos \
//!   -H "Content-Type: application/json" \
//!   -d '{"nome": "Civic", "marca": "Honda", "ano": 2020}'
//!
//! curl "http://localhost:3000/veiculos?pagina=1&marca=honda"
//!
//! open http://localhost:3000/swagger
//! ```

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use veiculos_api::api::{create_router, AppState};
use veiculos_api::auth::TokenService;
use veiculos_api::config::Config;
use veiculos_api::db::Store;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("veiculos_api=info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let store = if config.memory {
        Arc::new(Store::in_memory().await?)
    } else {
        Arc::new(Store::new(&config.database).await?)
    };
    info!("Using database: {}", store.path());

    let tokens = TokenService::new(config.jwt_secret.as_bytes())?;
    let state = AppState::new(Arc::clone(&store), tokens);

    if let Some((email, password)) = config.seed_admin() {
        if state.administrators.seed(email, password).await? {
            info!(email, "Seeded Adm account");
        }
    }

    let app = create_router(state);

    let addr = config.addr()?;
    info!("Veiculos API listening on {} (docs at /swagger)", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
