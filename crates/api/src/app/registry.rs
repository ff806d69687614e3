//! Route registry: route modules declare their bindings, discovery merges
//! them into one table, and the table becomes the `axum::Router`.
//!
//! Modules are picked up by name convention: a module takes part when its
//! name starts with the marker (`router_analysis`) or sits in the marker's
//! namespace (`router/analysis_table`). A module that fails to produce its
//! routes is logged and skipped without affecting the others. Two modules
//! binding the same method and path is a startup error.

use std::collections::{HashMap, HashSet};
use std::fmt;

use axum::handler::Handler;
use axum::http::Method;
use axum::routing::{self, MethodRouter};
use axum::Router;
use thiserror::Error;

/// A module could not produce its routes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ModuleLoadError(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("route {method} {path} registered by both `{first}` and `{second}`")]
    RouteConflict {
        method: Method,
        path: String,
        first: String,
        second: String,
    },
}

/// A `(method, path) -> handler` association.
pub struct RouteBinding {
    method: Method,
    path: String,
    route: MethodRouter,
}

impl RouteBinding {
    pub fn get<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self {
            method: Method::GET,
            path: path.into(),
            route: routing::get(handler),
        }
    }

    pub fn post<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self {
            method: Method::POST,
            path: path.into(),
            route: routing::post(handler),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn validate(&self) -> Result<(), ModuleLoadError> {
        if !self.path.starts_with('/') {
            return Err(ModuleLoadError(format!(
                "path `{}` must start with `/`",
                self.path
            )));
        }
        if self.path.chars().any(char::is_whitespace) {
            return Err(ModuleLoadError(format!(
                "path `{}` must not contain whitespace",
                self.path
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for RouteBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// A unit of routes, registered together or not at all.
pub trait RouteModule: Send + Sync {
    fn name(&self) -> &str;

    fn routes(&self) -> Result<Vec<RouteBinding>, ModuleLoadError>;
}

/// Bindings collected at startup, immutable once turned into a router.
#[derive(Debug, Default)]
pub struct RouteTable {
    bindings: Vec<RouteBinding>,
    owners: HashMap<(Method, String), String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add all of `owner`'s bindings, or none of them on conflict.
    pub fn insert(
        &mut self,
        owner: &str,
        bindings: Vec<RouteBinding>,
    ) -> Result<(), RegistryError> {
        let mut incoming = HashSet::new();
        for b in &bindings {
            let key = (b.method.clone(), b.path.clone());
            let first = match self.owners.get(&key) {
                Some(existing) => Some(existing.clone()),
                None if incoming.contains(&key) => Some(owner.to_string()),
                None => None,
            };
            if let Some(first) = first {
                return Err(RegistryError::RouteConflict {
                    method: b.method.clone(),
                    path: b.path.clone(),
                    first,
                    second: owner.to_string(),
                });
            }
            incoming.insert(key);
        }

        for b in bindings {
            self.owners
                .insert((b.method.clone(), b.path.clone()), owner.to_string());
            self.bindings.push(b);
        }
        Ok(())
    }

    pub fn contains(&self, method: &Method, path: &str) -> bool {
        self.owners.contains_key(&(method.clone(), path.to_string()))
    }

    /// `(method, path)` pairs in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.bindings.iter().map(|b| (&b.method, b.path.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn into_router(self) -> Router {
        self.bindings
            .into_iter()
            .fold(Router::new(), |router, b| router.route(&b.path, b.route))
    }
}

/// What discovery did with each module.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub loaded: Vec<String>,
    pub failed: Vec<String>,
    pub ignored: Vec<String>,
}

/// Whether `name` follows the `marker` naming convention.
pub fn matches_marker(name: &str, marker: &str) -> bool {
    !marker.is_empty() && name.starts_with(marker)
}

/// Register every module matching `marker` into `table`, in order.
pub fn discover(
    table: &mut RouteTable,
    marker: &str,
    modules: &[Box<dyn RouteModule>],
) -> Result<DiscoveryReport, RegistryError> {
    let mut report = DiscoveryReport::default();

    for module in modules {
        let name = module.name();
        if !matches_marker(name, marker) {
            tracing::debug!(module = name, marker, "module does not match marker; ignored");
            report.ignored.push(name.to_string());
            continue;
        }

        let bindings = module.routes().and_then(|bindings| {
            bindings.iter().try_for_each(RouteBinding::validate)?;
            Ok(bindings)
        });

        match bindings {
            Ok(bindings) => {
                let count = bindings.len();
                table.insert(name, bindings)?;
                tracing::info!(module = name, routes = count, "route module loaded");
                report.loaded.push(name.to_string());
            }
            Err(e) => {
                tracing::warn!(module = name, error = %e, "failed to load route module; skipped");
                report.failed.push(name.to_string());
            }
        }
    }

    Ok(report)
}
