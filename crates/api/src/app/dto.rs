//! Request/response bodies.

use serde::{Deserialize, Serialize};

use analysis_core::Row;

/// `{"data": [Row, ...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse {
    pub data: Vec<Row>,
}

/// `{"message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Form body of `POST /analysis-data`.
#[derive(Debug, Clone, Deserialize)]
pub struct TableForm {
    pub table_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}
