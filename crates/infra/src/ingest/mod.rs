//! CSV -> Postgres bulk ingestion.
//!
//! Stages, each one aborting the load on failure:
//!
//! 1. parse the file into a [`Frame`] (header row + optional cells)
//! 2. drop excluded columns
//! 3. optionally rename/project through a [`ColumnMapping`]
//! 4. lower-case column names
//! 5. drop fully-empty rows
//! 6. connect
//! 7. append every surviving row in one transaction
//!
//! Stages 1-5 are pure ([`prepare`]) so they can be exercised without a
//! database.

use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;

use analysis_core::{IdentifierError, TableName};

use crate::config::{self, ConfigSource, DatabaseConfig};
use crate::db::{Database, DbError};

pub mod frame;
pub mod mapping;
pub mod writer;

pub use frame::Frame;
pub use mapping::ColumnMapping;

/// Rows sent per INSERT statement.
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

/// Ingestion failures.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {found} fields, header has {expected}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("invalid target table: {0}")]
    InvalidTable(#[source] IdentifierError),

    #[error("invalid column `{column}`: {reason}")]
    InvalidColumn { column: String, reason: String },

    #[error("column `{0}` appears more than once after renaming")]
    DuplicateColumn(String),

    #[error("no columns left to insert")]
    NoColumns,

    #[error(transparent)]
    Database(#[from] DbError),
}

/// Per-run transform options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Columns removed before anything else (exact header match).
    pub exclude: Vec<String>,
    /// Rename/projection stage; `None` skips it.
    pub mapping: Option<ColumnMapping>,
    pub batch_size: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            exclude: vec!["SNo".to_string()],
            mapping: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Outcome of the pure transform stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    pub frame: Frame,
    pub rows_read: usize,
    pub empty_rows_dropped: usize,
}

/// Outcome of a whole load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub columns: Vec<String>,
    pub rows_read: usize,
    pub empty_rows_dropped: usize,
    pub rows_inserted: u64,
}

/// Run stages 2-5 over an already parsed frame.
pub fn prepare(mut frame: Frame, options: &LoadOptions) -> Prepared {
    let rows_read = frame.len();

    frame.drop_columns(&options.exclude);

    if let Some(mapping) = options.mapping.as_ref().filter(|m| !m.is_empty()) {
        let missing = frame.apply_mapping(mapping);
        if !missing.is_empty() {
            tracing::warn!(?missing, "mapped columns not present in file; skipped");
        }
    }

    frame.lowercase_columns();
    let empty_rows_dropped = frame.drop_empty_rows();

    Prepared {
        frame,
        rows_read,
        empty_rows_dropped,
    }
}

/// Read `path`, transform it, and append the rows into `table`.
pub async fn load(
    path: &Path,
    db_config: &DatabaseConfig,
    table: &str,
    options: &LoadOptions,
) -> Result<LoadReport, IngestError> {
    let table = TableName::parse(table).map_err(IngestError::InvalidTable)?;

    tracing::info!(path = %path.display(), "reading csv file");
    let file = File::open(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let frame = Frame::read_csv(file)?;
    tracing::info!(columns = ?frame.columns(), "columns in csv");

    let prepared = prepare(frame, options);
    let columns = prepared.frame.column_identifiers()?;
    tracing::info!(
        columns = ?prepared.frame.columns(),
        rows = prepared.frame.len(),
        empty_rows_dropped = prepared.empty_rows_dropped,
        "rows ready for insertion"
    );

    let db = Database::open(db_config).await?;
    let records = prepared.frame.records();
    let result = writer::append_rows(db.pool(), &table, &columns, &records, options.batch_size).await;
    db.close().await;
    let rows_inserted = result?;

    tracing::info!(table = %table, rows_inserted, "data inserted");
    Ok(LoadReport {
        columns: prepared.frame.columns().to_vec(),
        rows_read: prepared.rows_read,
        empty_rows_dropped: prepared.empty_rows_dropped,
        rows_inserted,
    })
}

/// Loader job settings: which file goes into which table, and how.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub csv_path: PathBuf,
    pub table: String,
    pub options: LoadOptions,
    pub database: DatabaseConfig,
}

impl LoaderConfig {
    pub const DEFAULT_CSV_PATH: &'static str = "csvs/clustered_projects.csv";
    pub const DEFAULT_TABLE: &'static str = "clustered_projects";

    pub fn from_env() -> Self {
        Self::from_lookup(&config::process_env())
    }

    pub fn from_lookup(source: &impl ConfigSource) -> Self {
        let apply_mapping = config::bool_var(source, "CSV_APPLY_MAPPING", false);
        Self {
            csv_path: config::string_var(source, "CSV_PATH")
                .unwrap_or_else(|| Self::DEFAULT_CSV_PATH.to_string())
                .into(),
            table: config::string_var(source, "CSV_TABLE")
                .unwrap_or_else(|| Self::DEFAULT_TABLE.to_string()),
            options: LoadOptions {
                mapping: apply_mapping.then(ColumnMapping::clustered_projects),
                batch_size: config::parse_var(source, "CSV_BATCH_SIZE", DEFAULT_BATCH_SIZE).max(1),
                ..LoadOptions::default()
            },
            database: DatabaseConfig::from_lookup(source).single_connection(),
        }
    }
}
