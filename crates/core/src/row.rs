//! Generic query result row.

/// One result row: column name -> JSON value, in the column order the
/// database produced.
///
/// There is no typed model behind it; rows are serialized straight into the
/// response body.
pub type Row = serde_json::Map<String, serde_json::Value>;
