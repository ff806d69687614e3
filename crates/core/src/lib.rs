//! `analysis-core` — shared building blocks for the analysis data service.
//!
//! This crate has **no infrastructure concerns**: no database, no HTTP.

pub mod error;
pub mod identifier;
pub mod row;

pub use error::{IdentifierError, IdentifierResult};
pub use identifier::{Identifier, TableAllowList, TableName};
pub use row::Row;
