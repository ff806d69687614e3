//! Service configuration, read from the environment.

use std::net::SocketAddr;

use anyhow::Context;

use analysis_core::TableAllowList;
use analysis_infra::config::{self, ConfigSource};
use analysis_infra::DatabaseConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Which `/analysis-data` variant(s) get registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisRoutes {
    /// `GET /analysis-data` over the fixed `analysis_data` table.
    Fixed,
    /// `POST /analysis-data` with a caller-chosen `table_name`.
    Table,
    #[default]
    Both,
}

impl AnalysisRoutes {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fixed" => Some(Self::Fixed),
            "table" | "parameterized" => Some(Self::Table),
            "both" | "all" => Some(Self::Both),
            _ => None,
        }
    }

    pub fn fixed(self) -> bool {
        matches!(self, Self::Fixed | Self::Both)
    }

    pub fn table(self) -> bool {
        matches!(self, Self::Table | Self::Both)
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `ANALYSIS_ROUTES`
    pub analysis_routes: AnalysisRoutes,
    /// `ANALYSIS_TABLE_ALLOWLIST` (comma separated; empty = any valid name)
    pub allow_list: TableAllowList,
    /// `EXPOSE_ERROR_DETAIL`
    pub expose_error_detail: bool,
    pub database: DatabaseConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(&config::process_env())
    }

    pub fn from_lookup(source: &impl ConfigSource) -> anyhow::Result<Self> {
        let bind_addr = config::string_var(source, "BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("BIND_ADDR `{bind_addr}` is not a socket address"))?;

        let analysis_routes = match config::string_var(source, "ANALYSIS_ROUTES") {
            None => AnalysisRoutes::default(),
            Some(raw) => AnalysisRoutes::parse(&raw).with_context(|| {
                format!("ANALYSIS_ROUTES `{raw}` must be one of: fixed, table, both")
            })?,
        };

        let allow_list = match config::string_var(source, "ANALYSIS_TABLE_ALLOWLIST") {
            None => TableAllowList::open(),
            Some(raw) => TableAllowList::from_csv(&raw).context("ANALYSIS_TABLE_ALLOWLIST")?,
        };

        Ok(Self {
            bind_addr,
            analysis_routes,
            allow_list,
            expose_error_detail: config::bool_var(source, "EXPOSE_ERROR_DETAIL", false),
            database: DatabaseConfig::from_lookup(source),
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            analysis_routes: AnalysisRoutes::default(),
            allow_list: TableAllowList::open(),
            expose_error_detail: false,
            database: DatabaseConfig::from_lookup(&|_: &str| None::<String>),
        }
    }
}
