//! Cross-cutting HTTP layers.

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::context::AppState;

/// Attach shared state, request tracing, and unrestricted CORS.
///
/// CORS allows every origin, method, and header. Credentials are not
/// advertised: browsers reject a wildcard origin combined with credentials.
pub fn apply(router: Router, state: AppState) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(axum::Extension(state)),
    )
}
