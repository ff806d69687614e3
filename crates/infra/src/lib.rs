//! Infrastructure layer: configuration, the Postgres connector, CSV ingestion.

pub mod config;
pub mod db;
pub mod ingest;

pub use config::DatabaseConfig;
pub use db::{close_optional, Database, DbError};
