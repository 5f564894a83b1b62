//! Configuration handling for the lookup tool.
//!
//! Everything is read from environment variables with development defaults,
//! so the CLI works out of the box and deployments can override behavior
//! without flags. `Config::from_env` performs the loading and validation.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::sites::SiteId;

/// Environment variable names. Public so tests and scripts can refer to
/// them.
pub const ENV_DEFAULT_SITE: &str = "SOZLUK_DEFAULT_SITE";
pub const ENV_SANITIZE: &str = "SOZLUK_SANITIZE";
pub const ENV_OUTPUT: &str = "SOZLUK_OUTPUT";

/// Default values used when environment variables are absent.
const DEFAULT_SITE: SiteId = SiteId::Tureng;
const DEFAULT_SANITIZE: bool = true;
const DEFAULT_OUTPUT: OutputFormat = OutputFormat::Html;

/// How the CLI renders the panel entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("expected 'html' or 'json', got '{other}'")),
        }
    }
}

/// Runtime configuration for the lookup tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    default_site: SiteId,
    sanitize: bool,
    output: OutputFormat,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(default_site: SiteId, sanitize: bool, output: OutputFormat) -> Self {
        Self {
            default_site,
            sanitize,
            output,
        }
    }

    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let default_site = match env::var(ENV_DEFAULT_SITE) {
            Ok(value) => value.parse::<SiteId>().map_err(|e| ConfigError::InvalidValue {
                field: ENV_DEFAULT_SITE,
                reason: e.to_string(),
            })?,
            Err(_) => DEFAULT_SITE,
        };
        let sanitize = match env::var(ENV_SANITIZE) {
            Ok(value) => parse_bool(&value).ok_or_else(|| ConfigError::InvalidValue {
                field: ENV_SANITIZE,
                reason: format!("expected a boolean, got '{value}'"),
            })?,
            Err(_) => DEFAULT_SANITIZE,
        };
        let output = match env::var(ENV_OUTPUT) {
            Ok(value) => value
                .parse::<OutputFormat>()
                .map_err(|reason| ConfigError::InvalidValue {
                    field: ENV_OUTPUT,
                    reason,
                })?,
            Err(_) => DEFAULT_OUTPUT,
        };
        Ok(Self {
            default_site,
            sanitize,
            output,
        })
    }

    /// Site queried when the command line names none.
    pub fn default_site(&self) -> SiteId {
        self.default_site
    }
    /// Whether extracted fragments are sanitized before publishing.
    pub fn sanitize(&self) -> bool {
        self.sanitize
    }
    /// Panel rendering format for the CLI.
    pub fn output(&self) -> OutputFormat {
        self.output
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SITE, DEFAULT_SANITIZE, DEFAULT_OUTPUT)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
