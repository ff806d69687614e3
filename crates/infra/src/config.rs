//! Configuration loading and representation.
//!
//! Everything is read from environment variables (optionally seeded from a
//! `.env` file by the binaries). Each config has a pure `from_lookup`
//! constructor so parsing can be tested without touching the process env.

use core::fmt;
use core::str::FromStr;

/// Default lower bound of pooled connections.
pub const DEFAULT_MIN_CONNECTIONS: u32 = 5;
/// Default upper bound of pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Key/value source for configuration (normally `std::env::var`).
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

impl<F> ConfigSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// The process environment.
pub fn process_env() -> impl ConfigSource {
    |key: &str| std::env::var(key).ok()
}

/// Read a non-blank string value.
pub fn string_var(source: &impl ConfigSource, key: &str) -> Option<String> {
    source
        .get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a value, falling back to `default` (with a warning) when it is malformed.
pub fn parse_var<T>(source: &impl ConfigSource, key: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    match string_var(source, key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "invalid config value; using default");
            default
        }),
    }
}

/// Parse a boolean flag (`1/0`, `true/false`, `yes/no`, `on/off`).
pub fn bool_var(source: &impl ConfigSource, key: &str, default: bool) -> bool {
    match string_var(source, key).map(|v| v.to_ascii_lowercase()) {
        None => default,
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                tracing::warn!(key, value = %v, default, "invalid boolean config value; using default");
                default
            }
        },
    }
}

/// Postgres connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `DATABASE_URL`; `None` means the service runs without a database.
    pub url: Option<String>,
    /// `POSTGRES_MIN_CONNECTION`
    pub min_connections: u32,
    /// `POSTGRES_MAX_CONNECTION`
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env())
    }

    pub fn from_lookup(source: &impl ConfigSource) -> Self {
        let max_connections =
            parse_var(source, "POSTGRES_MAX_CONNECTION", DEFAULT_MAX_CONNECTIONS).max(1);
        let mut min_connections =
            parse_var(source, "POSTGRES_MIN_CONNECTION", DEFAULT_MIN_CONNECTIONS);
        if min_connections > max_connections {
            tracing::warn!(
                min_connections,
                max_connections,
                "POSTGRES_MIN_CONNECTION exceeds POSTGRES_MAX_CONNECTION; clamping"
            );
            min_connections = max_connections;
        }

        Self {
            url: string_var(source, "DATABASE_URL"),
            min_connections,
            max_connections,
        }
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            min_connections: DEFAULT_MIN_CONNECTIONS,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Same target, but a pool of exactly one connection (one-shot jobs).
    pub fn single_connection(mut self) -> Self {
        self.min_connections = 1;
        self.max_connections = 1;
        self
    }

    /// URL with any password replaced, safe to log.
    pub fn redacted_url(&self) -> Option<String> {
        self.url.as_deref().map(redact_password)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.redacted_url())
            .field("min_connections", &self.min_connections)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

fn redact_password(url: &str) -> String {
    let Some(scheme_end) = url.find("://").map(|i| i + 3) else {
        return url.to_string();
    };
    let rest = &url[scheme_end..];
    let Some(at) = rest.find('@') else {
        return url.to_string();
    };
    match rest[..at].find(':') {
        Some(colon) => format!(
            "{}{}:***{}",
            &url[..scheme_end],
            &rest[..colon],
            &rest[at..]
        ),
        None => url.to_string(),
    }
}
