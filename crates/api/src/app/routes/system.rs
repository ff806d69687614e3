use axum::extract::Extension;
use axum::Json;

use crate::app::dto::{HealthResponse, MessageResponse};
use crate::app::registry::{ModuleLoadError, RouteBinding, RouteModule};
use crate::context::AppState;

pub async fn root(Extension(state): Extension<AppState>) -> Json<MessageResponse> {
    let message = if state.has_database() {
        "Analysis Data API is running and connected to PostgreSQL"
    } else {
        "Analysis Data API is running without a database connection"
    };
    Json(MessageResponse::new(message))
}

pub async fn health(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    let database = if state.has_database() { "connected" } else { "unavailable" };
    Json(HealthResponse {
        status: "ok".to_string(),
        database: database.to_string(),
    })
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello, World!"))
}

/// `GET /lol`
pub struct GreetingRoutes;

impl RouteModule for GreetingRoutes {
    fn name(&self) -> &str {
        "router_greeting"
    }

    fn routes(&self) -> Result<Vec<RouteBinding>, ModuleLoadError> {
        Ok(vec![RouteBinding::get("/lol", hello)])
    }
}
