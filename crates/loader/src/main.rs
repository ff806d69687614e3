//! One-shot CSV -> Postgres loader.
//!
//! Configured through the environment (see `LoaderConfig`); defaults load
//! `csvs/clustered_projects.csv` into `clustered_projects`. Failures are
//! logged and the process still exits with status 0.

use analysis_infra::ingest::{self, LoaderConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    analysis_observability::init();

    let config = LoaderConfig::from_env();
    tracing::info!(
        path = %config.csv_path.display(),
        table = %config.table,
        mapping = config.options.mapping.is_some(),
        "starting csv load"
    );

    match ingest::load(&config.csv_path, &config.database, &config.table, &config.options).await {
        Ok(report) => tracing::info!(
            rows_read = report.rows_read,
            empty_rows_dropped = report.empty_rows_dropped,
            rows_inserted = report.rows_inserted,
            columns = ?report.columns,
            "csv load finished"
        ),
        Err(e) => tracing::error!(error = %e, "error inserting data"),
    }
}
