//! Bulk append of prepared rows into an existing table.

use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use analysis_core::{Identifier, Row, TableName};

use crate::db::map_sqlx_error;

use super::IngestError;

/// `INSERT ... SELECT` over `jsonb_populate_recordset`, so PostgreSQL coerces
/// each text cell to the destination column's type and rejects columns the
/// table does not have.
pub(crate) fn append_sql(table: &TableName, columns: &[Identifier]) -> String {
    let list = columns
        .iter()
        .map(Identifier::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {table} ({list}) SELECT {list} FROM jsonb_populate_recordset(NULL::{table}, $1)"
    )
}

/// Append all `records` in one transaction, `batch_size` rows per statement.
///
/// Nothing is committed unless every batch succeeds.
#[instrument(skip(pool, table, columns, records), fields(table = %table, rows = records.len()), err)]
pub async fn append_rows(
    pool: &PgPool,
    table: &TableName,
    columns: &[Identifier],
    records: &[Row],
    batch_size: usize,
) -> Result<u64, IngestError> {
    if records.is_empty() {
        return Ok(0);
    }

    let sql = append_sql(table, columns);
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| map_sqlx_error("begin", e))?;

    let mut inserted = 0;
    for batch in records.chunks(batch_size.max(1)) {
        let result = sqlx::query(&sql)
            .bind(Json(batch))
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("append_rows", e))?;
        inserted += result.rows_affected();
        tracing::debug!(batch = batch.len(), inserted, "batch appended");
    }

    tx.commit()
        .await
        .map_err(|e| map_sqlx_error("commit", e))?;
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_insert_over_recordset() {
        let table = TableName::parse("clustered_projects").unwrap();
        let cols = vec![
            Identifier::parse("state").unwrap(),
            Identifier::parse("expenditure").unwrap(),
        ];
        assert_eq!(
            append_sql(&table, &cols),
            "INSERT INTO clustered_projects (state, expenditure) \
             SELECT state, expenditure \
             FROM jsonb_populate_recordset(NULL::clustered_projects, $1)"
        );
    }
}
