//! Validated SQL identifiers.
//!
//! Table and column names cannot be bound as query parameters, so anything
//! that ends up spliced into SQL text goes through these types first.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{IdentifierError, IdentifierResult};

/// PostgreSQL truncates identifiers longer than `NAMEDATALEN - 1` bytes.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// A bare SQL identifier matching `^[A-Za-z_][A-Za-z0-9_]*$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(raw: &str) -> IdentifierResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if raw.len() > MAX_IDENTIFIER_LEN {
            return Err(IdentifierError::TooLong(raw.to_string()));
        }

        let mut chars = raw.chars();
        let head_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !head_ok || !tail_ok {
            return Err(IdentifierError::InvalidCharacters(raw.to_string()));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

/// Name of a table a query is allowed to read from or write into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableName(Identifier);

impl TableName {
    pub fn parse(raw: &str) -> IdentifierResult<Self> {
        Identifier::parse(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TableName {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Optional allow-list of readable tables.
///
/// An empty list allows every well-formed table name. Matching is
/// case-insensitive, mirroring how PostgreSQL folds unquoted identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableAllowList {
    tables: BTreeSet<String>,
}

impl TableAllowList {
    /// Allow every well-formed table name.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn new<I, S>(tables: I) -> IdentifierResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tables = tables
            .into_iter()
            .map(|t| TableName::parse(t.as_ref()).map(|t| t.as_str().to_ascii_lowercase()))
            .collect::<IdentifierResult<BTreeSet<_>>>()?;
        Ok(Self { tables })
    }

    /// Parse a comma-separated list (`"a, b,c"`); blank entries are ignored.
    pub fn from_csv(raw: &str) -> IdentifierResult<Self> {
        Self::new(raw.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    pub fn is_open(&self) -> bool {
        self.tables.is_empty()
    }

    /// Validate `raw` as a table name and check it against the list.
    pub fn check(&self, raw: &str) -> IdentifierResult<TableName> {
        let table = TableName::parse(raw)?;
        if self.is_open() || self.tables.contains(&table.as_str().to_ascii_lowercase()) {
            Ok(table)
        } else {
            Err(IdentifierError::NotAllowed(table.as_str().to_string()))
        }
    }
}
