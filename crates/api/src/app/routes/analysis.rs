//! Read-only query endpoints over `/analysis-data`.
//!
//! Two variants exist; `ANALYSIS_ROUTES` decides which are registered.

use axum::extract::rejection::FormRejection;
use axum::extract::{Extension, Form};
use axum::Json;

use crate::app::dto::{DataResponse, TableForm};
use crate::app::errors::ApiError;
use crate::app::registry::{ModuleLoadError, RouteBinding, RouteModule};
use crate::context::AppState;

pub const ANALYSIS_PATH: &str = "/analysis-data";
pub const FIXED_QUERY: &str = "SELECT * FROM analysis_data";

/// `GET /analysis-data`: every row of `analysis_data`.
pub async fn read_analysis_data(
    Extension(state): Extension<AppState>,
) -> Result<Json<DataResponse>, ApiError> {
    let db = state.database()?;
    let data = db
        .fetch_all(FIXED_QUERY)
        .await
        .map_err(|e| state.query_error(e))?;
    Ok(Json(DataResponse { data }))
}

/// `POST /analysis-data` (form `table_name`): every row of the chosen table.
///
/// The name is validated (and checked against the allow-list) before a
/// connection is needed, so a bad name is a 400 even with no database.
/// A malformed or incomplete form keeps the `{"detail": ..}` body shape.
pub async fn read_table(
    Extension(state): Extension<AppState>,
    form: Result<Form<TableForm>, FormRejection>,
) -> Result<Json<DataResponse>, ApiError> {
    let Form(form) = form?;
    let table = state.check_table(&form.table_name).inspect_err(|e| {
        tracing::warn!(table_name = %form.table_name, error = %e, "rejected table name");
    })?;

    let db = state.database()?;
    let data = db
        .fetch_all(&format!("SELECT * FROM {table}"))
        .await
        .map_err(|e| state.query_error(e))?;
    Ok(Json(DataResponse { data }))
}

/// Hardcoded-query variant.
pub struct FixedQueryRoutes;

impl RouteModule for FixedQueryRoutes {
    fn name(&self) -> &str {
        "router_analysis"
    }

    fn routes(&self) -> Result<Vec<RouteBinding>, ModuleLoadError> {
        Ok(vec![RouteBinding::get(ANALYSIS_PATH, read_analysis_data)])
    }
}

/// Caller-chosen-table variant.
pub struct TableQueryRoutes;

impl RouteModule for TableQueryRoutes {
    fn name(&self) -> &str {
        "router/analysis_table"
    }

    fn routes(&self) -> Result<Vec<RouteBinding>, ModuleLoadError> {
        Ok(vec![RouteBinding::post(ANALYSIS_PATH, read_table)])
    }
}
