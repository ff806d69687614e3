//! HTTP API: configuration, route registry, request handlers.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
