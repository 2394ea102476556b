// crates/dataplan-gate-config/src/config.rs
// ============================================================================
// Module: Data Plan Gate Configuration
// Description: Configuration loading and validation for Data Plan Gate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: dataplan-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Relative data-plan paths resolve against the directory of the config file.
//! A missing data-plan path is valid and means "no data plan": every blocking
//! gate is then a no-op.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use dataplan_gate_core::DataPlanDocument;
use dataplan_gate_core::PolicyOverrides;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "dataplan-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "DATAPLAN_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default data-plan file size limit.
pub const DEFAULT_DATA_PLAN_MAX_BYTES: usize = 1024 * 1024;
/// Upper bound for the configurable data-plan size limit.
pub(crate) const MAX_DATA_PLAN_MAX_BYTES: usize = 16 * 1024 * 1024;
/// Maximum length of the log filter directive.
pub(crate) const MAX_LOG_FILTER_LENGTH: usize = 1024;
/// Default log filter directive.
const DEFAULT_LOG_FILTER: &str = "info";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Data Plan Gate configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Data-plan source settings.
    #[serde(default)]
    pub data_plan: DataPlanConfig,
    /// Host overrides of the document policy flags.
    #[serde(default)]
    pub blocking: PolicyOverrides,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Directory of the loaded config file (not serialized).
    #[serde(skip)]
    pub source_dir: Option<PathBuf>,
}

impl GateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: `path`, then [`CONFIG_ENV_VAR`], then
    /// `dataplan-gate.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        Self::load_from(&resolved.path)
    }

    /// Loads configuration like [`GateConfig::load`], falling back to defaults
    /// when no path was requested and the default file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an existing or requested file fails to load.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        if !resolved.explicit && !resolved.path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&resolved.path)
    }

    /// Reads, parses, and validates one config file.
    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        validate_path(path)?;
        let bytes = read_limited(path, MAX_CONFIG_FILE_SIZE, "config file")?;
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.source_dir = path.parent().map(Path::to_path_buf);
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.data_plan.validate()?;
        self.logging.validate()
    }

    /// Returns the host policy overrides.
    #[must_use]
    pub const fn policy_overrides(&self) -> PolicyOverrides {
        self.blocking
    }

    /// Returns the configured data-plan path resolved against the config directory.
    #[must_use]
    pub fn data_plan_path(&self) -> Option<PathBuf> {
        let path = Path::new(self.data_plan.path.as_deref()?.trim());
        if path.is_absolute() {
            return Some(path.to_path_buf());
        }
        Some(self.source_dir.as_ref().map_or_else(|| path.to_path_buf(), |dir| dir.join(path)))
    }

    /// Loads the configured data plan; `None` when no path is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load_data_plan(&self) -> Result<Option<DataPlanDocument>, ConfigError> {
        self.data_plan_path()
            .map(|path| read_data_plan(&path, self.data_plan.max_bytes))
            .transpose()
    }
}

/// Data-plan source settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataPlanConfig {
    /// Data-plan JSON file; absent means no data plan.
    #[serde(default)]
    pub path: Option<String>,
    /// Maximum data-plan file size in bytes.
    #[serde(default = "default_data_plan_max_bytes")]
    pub max_bytes: usize,
}

impl Default for DataPlanConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_bytes: DEFAULT_DATA_PLAN_MAX_BYTES,
        }
    }
}

impl DataPlanConfig {
    /// Validates data-plan settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("data_plan.path", path)?;
        }
        if self.max_bytes == 0 || self.max_bytes > MAX_DATA_PLAN_MAX_BYTES {
            return Err(ConfigError::Invalid(format!(
                "data_plan.max_bytes must be between 1 and {MAX_DATA_PLAN_MAX_BYTES}"
            )));
        }
        Ok(())
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive (e.g. `info`, `dataplan_gate=debug`).
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl LoggingConfig {
    /// Validates logging settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let trimmed = self.filter.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Invalid("logging.filter must be non-empty".to_string()));
        }
        if trimmed.len() > MAX_LOG_FILTER_LENGTH {
            return Err(ConfigError::Invalid("logging.filter exceeds max length".to_string()));
        }
        Ok(())
    }
}

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration or a data plan.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// The data-plan file is not a data plan.
    #[error("invalid data plan: {0}")]
    DataPlan(String),
}

// ============================================================================
// SECTION: Data Plan Loading
// ============================================================================

/// Reads and parses a data-plan file, enforcing `max_bytes`.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file is unreadable, too large, or not a data plan.
pub fn read_data_plan(path: &Path, max_bytes: usize) -> Result<DataPlanDocument, ConfigError> {
    validate_path(path)?;
    let bytes = read_limited(path, max_bytes, "data plan file")?;
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| ConfigError::DataPlan("data plan file must be utf-8".to_string()))?;
    DataPlanDocument::from_json_str(content).map_err(|err| ConfigError::DataPlan(err.to_string()))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Config path together with whether the caller asked for it.
struct ResolvedPath {
    /// Path to load.
    path: PathBuf,
    /// True when the path came from the caller or the environment.
    explicit: bool,
}

/// Resolves the config path using CLI, environment, or default.
fn resolve_path(path: Option<&Path>) -> Result<ResolvedPath, ConfigError> {
    if let Some(path) = path {
        return Ok(ResolvedPath {
            path: path.to_path_buf(),
            explicit: true,
        });
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(ResolvedPath {
            path: PathBuf::from(env_path),
            explicit: true,
        });
    }
    Ok(ResolvedPath {
        path: PathBuf::from(DEFAULT_CONFIG_NAME),
        explicit: false,
    })
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Reads a file after checking its size against `limit`.
fn read_limited(path: &Path, limit: usize, label: &str) -> Result<Vec<u8>, ConfigError> {
    let metadata = fs::metadata(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    if !usize::try_from(metadata.len()).is_ok_and(|len| len <= limit) {
        return Err(ConfigError::Invalid(format!("{label} exceeds size limit")));
    }
    let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    if bytes.len() > limit {
        return Err(ConfigError::Invalid(format!("{label} exceeds size limit")));
    }
    Ok(bytes)
}

/// Serde default for [`DataPlanConfig::max_bytes`].
const fn default_data_plan_max_bytes() -> usize {
    DEFAULT_DATA_PLAN_MAX_BYTES
}

/// Serde default for [`LoggingConfig::filter`].
fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
