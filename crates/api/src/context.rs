use std::sync::Arc;

use analysis_core::{IdentifierResult, TableAllowList, TableName};
use analysis_infra::{Database, DbError};

use crate::app::errors::ApiError;

/// Per-process dependencies handed to every handler (`Extension<AppState>`).
///
/// Owned by the bootstrap; handlers only borrow the connection handle.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    db: Option<Database>,
    allow_list: TableAllowList,
    expose_error_detail: bool,
}

impl AppState {
    pub fn new(db: Option<Database>, allow_list: TableAllowList, expose_error_detail: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                db,
                allow_list,
                expose_error_detail,
            }),
        }
    }

    /// State with no database attached and no table restrictions.
    pub fn detached() -> Self {
        Self::new(None, TableAllowList::open(), false)
    }

    /// The live connection handle, or `ResourceUnavailable`.
    pub fn database(&self) -> Result<&Database, ApiError> {
        self.inner
            .db
            .as_ref()
            .filter(|db| !db.is_closed())
            .ok_or(ApiError::ResourceUnavailable)
    }

    pub fn has_database(&self) -> bool {
        self.database().is_ok()
    }

    pub fn check_table(&self, raw: &str) -> IdentifierResult<TableName> {
        self.inner.allow_list.check(raw)
    }

    /// Turn a connector error into a response error, hiding driver text
    /// unless `EXPOSE_ERROR_DETAIL` is on.
    pub fn query_error(&self, err: DbError) -> ApiError {
        tracing::error!(error = %err, "query failed");
        if self.inner.expose_error_detail {
            ApiError::Query(err.to_string())
        } else {
            ApiError::Query("database query failed".to_string())
        }
    }
}
