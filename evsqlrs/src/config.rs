//! Configuration for the extraction and execution pipeline.
//!
//! Supports TOML-based configuration with built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EvsqlError, Result};
use crate::resolve::OutputIdScheme;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EvsqlConfig {
    pub parser: ParserConfig,
    pub query: QueryConfig,
    pub output: OutputConfig,
}

/// SQL parse adapter configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Dialect used when parsing raw analytics statements.
    pub dialect: SqlDialectKind,
}

/// Dialect of the incoming analytics SQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialectKind {
    #[default]
    Postgres,
    Generic,
}

/// Query execution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Maximum rows appended to a result (0 = unlimited).
    pub max_row_limit: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { max_row_limit: 0 }
    }
}

/// Result value rendering configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Identifier scheme used when resolving option and legend values.
    pub id_scheme: OutputIdScheme,
}

impl EvsqlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| EvsqlError::Config(format!("failed to parse config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = EvsqlConfig::default();
        assert_eq!(cfg.parser.dialect, SqlDialectKind::Postgres);
        assert_eq!(cfg.query.max_row_limit, 0);
        assert_eq!(cfg.output.id_scheme, OutputIdScheme::Uid);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[parser]
dialect = "generic"

[query]
max_row_limit = 100000

[output]
id_scheme = "code"
"#;
        let cfg = EvsqlConfig::from_toml(toml).unwrap();
        assert_eq!(cfg.parser.dialect, SqlDialectKind::Generic);
        assert_eq!(cfg.query.max_row_limit, 100_000);
        assert_eq!(cfg.output.id_scheme, OutputIdScheme::Code);
    }

    #[test]
    fn test_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[query]\nmax_row_limit = 7").unwrap();

        let cfg = EvsqlConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.query.max_row_limit, 7);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = EvsqlConfig::from_toml("[parser]\ndialect = 12").unwrap_err();
        assert!(matches!(err, EvsqlError::Config(_)));
    }
}
