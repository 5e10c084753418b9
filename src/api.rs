//! # API
//!
//! Router composition for the HTTP surface.
//!
//! ## Endpoints
//!
//! - `GET /` - Home
//! - `GET /health` - Database liveness
//! - `POST /administradores/login` (also `/login`) - Exchange credentials for a token
//! - `GET|POST /administradores`, `GET /administradores/:id` - Administrators
//! - `GET|POST /veiculos`, `GET|PUT|DELETE /veiculos/:id` - Vehicles
//! - `GET /swagger` - Swagger UI over `/api-docs/openapi.json`

use crate::auth::{administrator_routes, AdministratorService, TokenService};
use crate::db::Store;
use crate::openapi::ApiDoc;
use crate::vehicles::{vehicle_routes, VehicleService};
use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub vehicles: VehicleService,
    pub administrators: AdministratorService,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(store: Arc<Store>, tokens: TokenService) -> Self {
        Self {
            vehicles: VehicleService::new(Arc::clone(&store)),
            administrators: AdministratorService::new(Arc::clone(&store)),
            store,
            tokens,
        }
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    pub mensagem: String,
    pub doc: String,
}

/// Creates the Axum router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_handler))
        .merge(administrator_routes())
        .merge(vehicle_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Home
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message", body = HomeResponse)),
    tag = "Home"
)]
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        mensagem: "Bem vindo a API de veículos - Minimal API".to_string(),
        doc: "/swagger".to_string(),
    })
}

/// Health check endpoint
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "database": "disconnected",
                "error": e.to_string()
            })),
        ),
    }
}
