//! # Vehicles
//!
//! CRUD over the `vehicles` table plus the `/veiculos` endpoints.
//!
//! Create and update share the same field rules; an update first checks that
//! the target exists, so an unknown id is reported as 404 even when the body
//! is also invalid.

use crate::api::AppState;
use crate::db::{Page, Store};
use crate::error::{ApiError, ApiResult, Validation};
use crate::models::{Vehicle, MIN_VEHICLE_YEAR};

use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use rusqlite::{params, OptionalExtension};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

// ============================================================================
// Service
// ============================================================================

/// Optional case-insensitive substring filters for [`VehicleService::list`].
#[derive(Debug, Clone, Default)]
pub struct VehicleFilter {
    pub name: Option<String>,
    pub brand: Option<String>,
}

#[derive(Clone)]
pub struct VehicleService {
    store: Arc<Store>,
}

impl VehicleService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Lists one page of vehicles ordered by id.
    pub async fn list(&self, page: Option<u32>, filter: VehicleFilter) -> ApiResult<Vec<Vehicle>> {
        let Page { limit, offset } = Page::new(page);
        let name = filter.name.filter(|s| !s.is_empty());
        let brand = filter.brand.filter(|s| !s.is_empty());

        self.store
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, name, brand, year FROM vehicles
                     WHERE (?1 IS NULL OR instr(unicode_lower(name), unicode_lower(?1)) > 0)
                       AND (?2 IS NULL OR instr(unicode_lower(brand), unicode_lower(?2)) > 0)
                     ORDER BY id
                     LIMIT ?3 OFFSET ?4",
                )?;
                let vehicles = stmt
                    .query_map(params![name, brand, limit, offset], Vehicle::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(vehicles)
            })
            .await
    }

    pub async fn find_by_id(&self, id: i64) -> ApiResult<Option<Vehicle>> {
        self.store
            .call(move |conn| {
                conn.query_row(
                    "SELECT id, name, brand, year FROM vehicles WHERE id = ?1",
                    params![id],
                    Vehicle::from_row,
                )
                .optional()
            })
            .await
    }

    /// Persists a new vehicle and returns it with its assigned id.
    /// Field rules are enforced by the caller.
    pub async fn create(&self, name: String, brand: String, year: i32) -> ApiResult<Vehicle> {
        let vehicle = self
            .store
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO vehicles (name, brand, year) VALUES (?1, ?2, ?3)",
                    params![name, brand, year],
                )?;
                Ok(Vehicle {
                    id: conn.last_insert_rowid(),
                    name,
                    brand,
                    year,
                })
            })
            .await?;

        info!(id = vehicle.id, "Vehicle created");
        Ok(vehicle)
    }

    /// Writes every field of `vehicle` over the row with the same id.
    /// Returns false when no such row exists.
    pub async fn update(&self, vehicle: &Vehicle) -> ApiResult<bool> {
        let Vehicle {
            id,
            name,
            brand,
            year,
        } = vehicle.clone();

        let affected = self
            .store
            .call(move |conn| {
                conn.execute(
                    "UPDATE vehicles SET name = ?1, brand = ?2, year = ?3 WHERE id = ?4",
                    params![name, brand, year, id],
                )
            })
            .await?;

        info!(id, "Vehicle updated");
        Ok(affected > 0)
    }

    /// Removes a vehicle by id. Returns false when no such row exists.
    pub async fn delete(&self, id: i64) -> ApiResult<bool> {
        let affected = self
            .store
            .call(move |conn| conn.execute("DELETE FROM vehicles WHERE id = ?1", params![id]))
            .await?;

        if affected > 0 {
            info!(id, "Vehicle deleted");
        }
        Ok(affected > 0)
    }
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Body for creating or replacing a vehicle. Missing fields count as empty.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VehicleRequest {
    #[serde(default, rename = "nome", alias = "name")]
    pub name: String,
    #[serde(default, rename = "marca", alias = "brand")]
    pub brand: String,
    #[serde(default, rename = "ano", alias = "year")]
    pub year: i32,
}

impl VehicleRequest {
    /// Strips surrounding whitespace from name and brand.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            brand: self.brand.trim().to_string(),
            year: self.year,
        }
    }

    pub fn validate(&self) -> ApiResult<()> {
        let mut validation = Validation::new();
        validation
            .check(self.name.trim().is_empty(), "O nome não pode ser vazio")
            .check(
                self.brand.trim().is_empty(),
                "A marca não pode ficar em branco",
            )
            .check(
                self.year < MIN_VEHICLE_YEAR,
                format!(
                    "Veículo muito antigo, aceito somente anos a partir de {}",
                    MIN_VEHICLE_YEAR
                ),
            );
        validation.finish()
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VehicleListQuery {
    /// 1-based page number (10 per page)
    pub pagina: Option<u32>,
    /// Case-insensitive substring of the vehicle name
    pub nome: Option<String>,
    /// Case-insensitive substring of the brand
    pub marca: Option<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// Lists vehicles, optionally filtered by name and brand
#[utoipa::path(
    get,
    path = "/veiculos",
    params(VehicleListQuery),
    responses((status = 200, description = "One page of vehicles", body = [Vehicle])),
    tag = "Veiculos"
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
) -> ApiResult<Json<Vec<Vehicle>>> {
    debug!(?query, "Listing vehicles");
    let filter = VehicleFilter {
        name: query.nome,
        brand: query.marca,
    };
    let vehicles = state.vehicles.list(query.pagina, filter).await?;
    Ok(Json(vehicles))
}

/// Fetches a vehicle by id
#[utoipa::path(
    get,
    path = "/veiculos/{id}",
    params(("id" = i64, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "The vehicle", body = Vehicle),
        (status = 404, description = "No vehicle with this id"),
    ),
    tag = "Veiculos"
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vehicle>> {
    let vehicle = state
        .vehicles
        .find_by_id(id)
        .await?
        .ok_or_else(|| vehicle_not_found(id))?;
    Ok(Json(vehicle))
}

/// Creates a vehicle
#[utoipa::path(
    post,
    path = "/veiculos",
    request_body = VehicleRequest,
    responses(
        (status = 201, description = "Vehicle created", body = Vehicle),
        (status = 400, description = "Invalid fields", body = crate::error::ValidationErrorBody),
    ),
    tag = "Veiculos"
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(req): Json<VehicleRequest>,
) -> ApiResult<impl IntoResponse> {
    let req = req.normalized();
    req.validate()?;

    let vehicle = state
        .vehicles
        .create(req.name, req.brand, req.year)
        .await?;
    let location = format!("/veiculos/{}", vehicle.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(vehicle)))
}

/// Replaces the fields of an existing vehicle
#[utoipa::path(
    put,
    path = "/veiculos/{id}",
    params(("id" = i64, Path, description = "Vehicle id")),
    request_body = VehicleRequest,
    responses(
        (status = 200, description = "Updated vehicle", body = Vehicle),
        (status = 400, description = "Invalid fields", body = crate::error::ValidationErrorBody),
        (status = 404, description = "No vehicle with this id"),
    ),
    tag = "Veiculos"
)]
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<VehicleRequest>,
) -> ApiResult<Json<Vehicle>> {
    let mut vehicle = state
        .vehicles
        .find_by_id(id)
        .await?
        .ok_or_else(|| vehicle_not_found(id))?;

    let req = req.normalized();
    req.validate()?;

    vehicle.name = req.name;
    vehicle.brand = req.brand;
    vehicle.year = req.year;

    // Deleted between the lookup and the write.
    if !state.vehicles.update(&vehicle).await? {
        return Err(vehicle_not_found(id));
    }
    Ok(Json(vehicle))
}

/// Deletes a vehicle
#[utoipa::path(
    delete,
    path = "/veiculos/{id}",
    params(("id" = i64, Path, description = "Vehicle id")),
    responses(
        (status = 204, description = "Vehicle deleted"),
        (status = 404, description = "No vehicle with this id"),
    ),
    tag = "Veiculos"
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if state.vehicles.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(vehicle_not_found(id))
    }
}

fn vehicle_not_found(id: i64) -> ApiError {
    ApiError::not_found(format!("Vehicle {} not found", id))
}

// ============================================================================
// Router
// ============================================================================

pub fn vehicle_routes() -> Router<AppState> {
    Router::new()
        .route("/veiculos", get(list_vehicles).post(create_vehicle))
        .route(
            "/veiculos/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

// ============================================================================
// Tests
// ============================================================================
