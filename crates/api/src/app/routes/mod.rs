use crate::app::registry::RouteModule;
use crate::config::ApiConfig;

pub mod analysis;
pub mod system;

/// Marker every route module name starts with.
pub const ROUTE_MARKER: &str = "router";

/// All route modules shipped with the service, in registration order.
pub fn inventory(config: &ApiConfig) -> Vec<Box<dyn RouteModule>> {
    let mut modules: Vec<Box<dyn RouteModule>> = vec![Box::new(system::GreetingRoutes)];
    if config.analysis_routes.fixed() {
        modules.push(Box::new(analysis::FixedQueryRoutes));
    }
    if config.analysis_routes.table() {
        modules.push(Box::new(analysis::TableQueryRoutes));
    }
    modules
}
