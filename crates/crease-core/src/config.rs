// Configuration loading and parsing (config/crease.toml).

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// File name of the single configuration file under `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "crease.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("no config at {config} and no defaults at {defaults}; pass --config-dir")]
    NoDefaults { config: PathBuf, defaults: PathBuf },

    #[error("failed to seed {path} from defaults: {source}")]
    Seed {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// crease.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub data: DataPaths,
    pub artifacts: ArtifactPaths,
    pub pre_match_model: ForestConfig,
    pub chase_model: LogisticConfig,
    #[serde(default)]
    pub serving: ServingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    /// Ball-by-ball match CSV.
    pub matches: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            matches: "data/psl.csv".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactPaths {
    pub dir: String,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            dir: "artifacts".into(),
        }
    }
}

/// Hyperparameters for the pre-match random forest.
#[derive(Debug, Clone, Deserialize)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub seed: u64,
    /// Trees grow until pure when unset.
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: default_min_samples_split(),
        }
    }
}

fn default_min_samples_split() -> usize {
    2
}

/// Hyperparameters for the chase logistic regression.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticConfig {
    /// Inverse L2 regularisation strength (larger = weaker penalty).
    pub c: f64,
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 100,
            tolerance: 1e-6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServingConfig {
    /// Number of roster names pre-selected as a playing XI.
    pub squad_size: usize,
    pub chase_target_min: u32,
    pub chase_target_max: u32,
}

impl Default for ServingConfig {
    fn default() -> Self {
        Self {
            squad_size: 11,
            chase_target_min: 100,
            chase_target_max: 250,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/crease.toml` relative to the
/// given `base_dir`.
///
/// Does not seed from defaults; `load_config_in()` does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Seed `config/crease.toml` from `defaults/crease.toml` when it is absent.
/// Returns the seeded path, or `None` when a config was already there.
pub fn seed_config(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.is_file() {
        return Ok(None);
    }
    let defaults = base_dir.join("defaults").join(CONFIG_FILE);
    if !defaults.is_file() {
        return Err(ConfigError::NoDefaults {
            config: target,
            defaults,
        });
    }

    let seed_err = |path: &Path, source| ConfigError::Seed {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir).map_err(|e| seed_err(dir, e))?;
    }
    fs::copy(&defaults, &target).map_err(|e| seed_err(&target, e))?;
    info!("seeded {} from {}", target.display(), defaults.display());
    Ok(Some(target))
}

/// Seed the config from defaults if needed, then load.
pub fn load_config_in(base_dir: &Path) -> Result<Config, ConfigError> {
    seed_config(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.matches.trim().is_empty() {
        return Err(invalid("data.matches", "must not be empty"));
    }
    if config.artifacts.dir.trim().is_empty() {
        return Err(invalid("artifacts.dir", "must not be empty"));
    }

    let forest = &config.pre_match_model;
    if forest.n_estimators == 0 {
        return Err(invalid("pre_match_model.n_estimators", "must be greater than 0"));
    }
    if forest.min_samples_split < 2 {
        return Err(invalid(
            "pre_match_model.min_samples_split",
            format!("must be at least 2, got {}", forest.min_samples_split),
        ));
    }
    if forest.max_depth == Some(0) {
        return Err(invalid("pre_match_model.max_depth", "must be greater than 0"));
    }

    let chase = &config.chase_model;
    if !(chase.c.is_finite() && chase.c > 0.0) {
        return Err(invalid("chase_model.c", format!("must be > 0, got {}", chase.c)));
    }
    if chase.max_iter == 0 {
        return Err(invalid("chase_model.max_iter", "must be greater than 0"));
    }
    if !(chase.tolerance.is_finite() && chase.tolerance > 0.0) {
        return Err(invalid(
            "chase_model.tolerance",
            format!("must be > 0, got {}", chase.tolerance),
        ));
    }

    let serving = &config.serving;
    if serving.squad_size == 0 {
        return Err(invalid("serving.squad_size", "must be greater than 0"));
    }
    if serving.chase_target_min > serving.chase_target_max {
        return Err(invalid(
            "serving.chase_target_min",
            format!(
                "must not exceed chase_target_max ({} > {})",
                serving.chase_target_min, serving.chase_target_max
            ),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
