//! In-memory tabular data read from a CSV file, and the transform stages
//! applied before insertion.

use std::collections::HashSet;
use std::io::Read;

use analysis_core::{Identifier, Row};

use super::mapping::ColumnMapping;
use super::IngestError;

/// Column names plus rows of optional cells (`None` = blank cell).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Frame {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    /// Parse comma-delimited text with a header row.
    ///
    /// Empty cells become `None`, and so do trailing cells missing from a
    /// short row. A row with more cells than the header is an error.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self, IngestError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.len() > columns.len() {
                return Err(IngestError::TooManyFields {
                    line: record.position().map_or(0, csv::Position::line),
                    expected: columns.len(),
                    found: record.len(),
                });
            }

            let mut row: Vec<Option<String>> = record
                .iter()
                .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                .collect();
            row.resize(columns.len(), None);
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop every column named in `exclude` (exact, case-sensitive match).
    pub fn drop_columns(&mut self, exclude: &[String]) {
        self.retain_columns(|name| !exclude.iter().any(|e| e == name));
    }

    /// Rename through `mapping` and keep only columns in its destination set.
    ///
    /// Returns the mapped source columns the file did not contain.
    pub fn apply_mapping(&mut self, mapping: &ColumnMapping) -> Vec<String> {
        for name in &mut self.columns {
            if let Some(dest) = mapping.rename(name) {
                *name = dest.to_string();
            }
        }
        self.retain_columns(|name| mapping.is_destination(name));

        mapping
            .destinations()
            .filter(|d| !self.columns.iter().any(|c| c == d))
            .map(str::to_string)
            .collect()
    }

    pub fn lowercase_columns(&mut self) {
        for name in &mut self.columns {
            *name = name.to_lowercase();
        }
    }

    /// Remove rows whose every cell is blank. Returns how many were dropped.
    pub fn drop_empty_rows(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| row.iter().any(Option::is_some));
        before - self.rows.len()
    }

    /// Validate column names for use in an INSERT column list.
    pub fn column_identifiers(&self) -> Result<Vec<Identifier>, IngestError> {
        if self.columns.is_empty() {
            return Err(IngestError::NoColumns);
        }

        let mut seen = HashSet::new();
        self.columns
            .iter()
            .map(|name| -> Result<Identifier, IngestError> {
                let ident = Identifier::parse(name).map_err(|e| IngestError::InvalidColumn {
                    column: name.clone(),
                    reason: e.to_string(),
                })?;
                if !seen.insert(ident.as_str().to_string()) {
                    return Err(IngestError::DuplicateColumn(name.clone()));
                }
                Ok(ident)
            })
            .collect()
    }

    /// Rows as JSON objects keyed by column, blank cells as `null`.
    pub fn records(&self) -> Vec<Row> {
        self.rows
            .iter()
            .map(|cells| {
                self.columns
                    .iter()
                    .zip(cells)
                    .map(|(col, cell)| {
                        let value = cell
                            .as_ref()
                            .map_or(serde_json::Value::Null, |s| s.clone().into());
                        (col.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }

    fn retain_columns(&mut self, keep: impl Fn(&str) -> bool) {
        let mask: Vec<bool> = self.columns.iter().map(|c| keep(c)).collect();
        if mask.iter().all(|k| *k) {
            return;
        }

        self.columns = keep_masked(std::mem::take(&mut self.columns), &mask);
        for row in &mut self.rows {
            *row = keep_masked(std::mem::take(row), &mask);
        }
    }
}

fn keep_masked<T>(values: Vec<T>, mask: &[bool]) -> Vec<T> {
    values
        .into_iter()
        .zip(mask)
        .filter_map(|(v, keep)| keep.then_some(v))
        .collect()
}
