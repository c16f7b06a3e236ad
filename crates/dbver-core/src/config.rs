//! Configuration types and parsing for dbver.yml
//!
//! Every field has a default, so a config file is optional. The CLI layers
//! flags and environment variables on top of whatever is loaded here.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "dbver.yml";

const DEFAULT_SERVER: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3306;
const DEFAULT_USER: &str = "root";
const DEFAULT_SQL_PATH: &str = "./sql";
const DEFAULT_VERSION_TABLE: &str = "dbVer";

/// Main configuration from dbver.yml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database connection settings
    #[serde(default)]
    pub database: ConnectionConfig,

    /// Root directory holding the `ver<N>` directories
    #[serde(default = "default_sql_path")]
    pub sql_path: PathBuf,

    /// Name of the version-tracking table, optionally `schema.table`
    #[serde(default = "default_version_table")]
    pub version_table: String,

    /// Fail on version directories whose name does not parse
    #[serde(default)]
    pub strict: bool,
}

/// Connection settings for the target database.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    /// Database server host
    #[serde(default = "default_server")]
    pub server: String,

    /// Database server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database name (required)
    #[serde(default)]
    pub name: Option<String>,

    /// Username
    #[serde(default = "default_user")]
    pub user: String,

    /// Password (required)
    #[serde(default)]
    pub password: Option<String>,
}

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_sql_path() -> PathBuf {
    PathBuf::from(DEFAULT_SQL_PATH)
}

fn default_version_table() -> String {
    DEFAULT_VERSION_TABLE.to_string()
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            port: default_port(),
            name: None,
            user: default_user(),
            password: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: ConnectionConfig::default(),
            sql_path: default_sql_path(),
            version_table: default_version_table(),
            strict: false,
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `dbver.yml` from `dir` if present, otherwise return the defaults.
    pub fn load_from_dir_or_default(dir: &Path) -> CoreResult<Self> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        VersionTable::parse(&self.version_table)?;
        if self.database.port == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "database port must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    /// The parsed version table name.
    pub fn version_table(&self) -> CoreResult<VersionTable> {
        VersionTable::parse(&self.version_table)
    }
}

impl ConnectionConfig {
    /// Names of required settings that are unset or empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.as_deref().is_none_or(str::is_empty) {
            missing.push("name");
        }
        if self.password.as_deref().is_none_or(str::is_empty) {
            missing.push("password");
        }
        missing
    }

    /// Database name, or an empty string when unset.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Connection string in `user:password@host:port/name` form with UTF-8
    /// and multi-statement execution enabled.
    pub fn dsn(&self) -> String {
        self.format_dsn(self.password.as_deref().unwrap_or_default())
    }

    /// [`dsn`](Self::dsn) with the password masked, for logs.
    pub fn redacted_dsn(&self) -> String {
        self.format_dsn("****")
    }

    fn format_dsn(&self, password: &str) -> String {
        format!(
            "{}:{}@{}:{}/{}?charset=utf8&multiStatements=true",
            self.user,
            password,
            self.server,
            self.port,
            self.name()
        )
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .finish()
    }
}

/// A validated version-table name, optionally schema-qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTable {
    schema: Option<String>,
    table: String,
}

impl VersionTable {
    /// Parse `table` or `schema.table`. Each part must be a plain
    /// identifier (`[A-Za-z_][A-Za-z0-9_]*`).
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let (schema, table) = match raw.split_once('.') {
            Some((schema, table)) => (Some(schema), table),
            None => (None, raw),
        };
        for part in schema.iter().chain(std::iter::once(&table)) {
            if !is_identifier(part) {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "invalid version table name '{raw}': each part must match [A-Za-z_][A-Za-z0-9_]*"
                    ),
                });
            }
        }
        Ok(Self {
            schema: schema.map(str::to_string),
            table: table.to_string(),
        })
    }

    /// Schema part, if qualified.
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Table part.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Quoted name for use in SQL text.
    pub fn quoted(&self) -> String {
        match &self.schema {
            Some(schema) => format!("\"{schema}\".\"{}\"", self.table),
            None => format!("\"{}\"", self.table),
        }
    }
}

impl Default for VersionTable {
    fn default() -> Self {
        Self {
            schema: None,
            table: DEFAULT_VERSION_TABLE.to_string(),
        }
    }
}

impl fmt::Display for VersionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.table),
            None => write!(f, "{}", self.table),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
