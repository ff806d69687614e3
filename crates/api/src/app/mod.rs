//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `registry.rs`: route modules, discovery, and the route table
//! - `routes/`: HTTP handlers (one file per area)
//! - `dto.rs`: request/response bodies
//! - `errors.rs`: consistent `{"detail": ...}` error responses

use axum::Router;

use analysis_infra::{Database, DbError, DatabaseConfig};

use crate::config::ApiConfig;
use crate::context::AppState;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod registry;
pub mod routes;

use registry::{RegistryError, RouteBinding, RouteModule, RouteTable};

/// Routes owned by the bootstrap itself (not by a route module).
fn bootstrap_routes() -> Vec<RouteBinding> {
    vec![
        RouteBinding::get("/", routes::system::root),
        RouteBinding::get("/health", routes::system::health),
    ]
}

/// Open the connector, degrading to `None` on any failure.
pub async fn open_database(config: &DatabaseConfig) -> Option<Database> {
    match Database::open(config).await {
        Ok(db) => Some(db),
        Err(DbError::NotConfigured) => {
            tracing::warn!("DATABASE_URL not set; starting without a database");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "database unavailable; starting without it");
            None
        }
    }
}

/// Build the full HTTP router from the shipped route modules.
pub fn build_app(config: &ApiConfig, state: AppState) -> Result<Router, RegistryError> {
    build_app_with(&routes::inventory(config), state)
}

/// Build the router from an explicit module list.
pub fn build_app_with(
    modules: &[Box<dyn RouteModule>],
    state: AppState,
) -> Result<Router, RegistryError> {
    let mut table = RouteTable::new();
    table.insert("bootstrap", bootstrap_routes())?;

    let report = registry::discover(&mut table, routes::ROUTE_MARKER, modules)?;
    tracing::info!(
        loaded = ?report.loaded,
        failed = ?report.failed,
        routes = table.len(),
        "route table built"
    );

    Ok(middleware::apply(table.into_router(), state))
}
