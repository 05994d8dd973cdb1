//! Configuration loading, validation, and management for querygate.
//!
//! Loads configuration from a TOML file with per-field serde defaults, so a
//! missing file or a partially specified one both yield a working engine.
//! The dictionary directory can be overridden with the
//! `QUERYGATE_DICT_DIR` environment variable.

use querygate_core::context::SizeTier;
use querygate_core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Classifier settings.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Context-cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Context-assembly settings.
    #[serde(default)]
    pub context: ContextConfig,

    /// Dictionary source settings.
    #[serde(default)]
    pub dictionary: DictionaryConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            cache: CacheConfig::default(),
            context: ContextConfig::default(),
            dictionary: DictionaryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Timeout on the external complexity-analysis call, in seconds.
    /// Timeout is treated identically to failure: conservative routing
    /// to the complex level.
    #[serde(default = "default_analysis_timeout_secs")]
    pub analysis_timeout_secs: u64,
}

fn default_analysis_timeout_secs() -> u64 {
    10
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            analysis_timeout_secs: default_analysis_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a cached context stays valid, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Default token ceiling per size tier, used when the caller does not
    /// supply an explicit budget.
    #[serde(default = "default_minimal_budget")]
    pub minimal_max_tokens: u32,

    #[serde(default = "default_light_budget")]
    pub light_max_tokens: u32,

    #[serde(default = "default_moderate_budget")]
    pub moderate_max_tokens: u32,

    #[serde(default = "default_full_budget")]
    pub full_max_tokens: u32,
}

fn default_minimal_budget() -> u32 {
    500
}
fn default_light_budget() -> u32 {
    1000
}
fn default_moderate_budget() -> u32 {
    2000
}
fn default_full_budget() -> u32 {
    4000
}

impl ContextConfig {
    /// The default token ceiling for a tier.
    pub fn budget_for(&self, tier: SizeTier) -> u32 {
        match tier {
            SizeTier::Minimal => self.minimal_max_tokens,
            SizeTier::Light => self.light_max_tokens,
            SizeTier::Moderate => self.moderate_max_tokens,
            SizeTier::Full => self.full_max_tokens,
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            minimal_max_tokens: default_minimal_budget(),
            light_max_tokens: default_light_budget(),
            moderate_max_tokens: default_moderate_budget(),
            full_max_tokens: default_full_budget(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Directory holding external dictionary source files.
    #[serde(default = "default_dictionary_dir")]
    pub dir: PathBuf,

    /// Source file names, merged in order (later files override earlier
    /// ones for duplicate keys).
    #[serde(default = "default_dictionary_sources")]
    pub sources: Vec<String>,
}

fn default_dictionary_dir() -> PathBuf {
    PathBuf::from("config/dictionaries")
}

fn default_dictionary_sources() -> Vec<String> {
    vec![
        "01-basic-queries.json".into(),
        "02-activity-attendance.json".into(),
        "05-query-templates.json".into(),
    ]
}

impl DictionaryConfig {
    /// Absolute paths of the configured sources, in merge order, honoring
    /// the `QUERYGATE_DICT_DIR` override.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        let dir = std::env::var("QUERYGATE_DICT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.dir.clone());
        self.sources.iter().map(|name| dir.join(name)).collect()
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            dir: default_dictionary_dir(),
            sources: default_dictionary_sources(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the defaults (with a debug log); a malformed
    /// file is an error — silently ignoring a broken config the operator
    /// wrote is worse than refusing to start.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                });
            }
        };

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate settings that serde defaults cannot protect.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "cache.ttl_secs must be positive".into(),
            ));
        }
        if self.classifier.analysis_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "classifier.analysis_timeout_secs must be positive".into(),
            ));
        }
        for (tier, budget) in [
            (SizeTier::Minimal, self.context.minimal_max_tokens),
            (SizeTier::Light, self.context.light_max_tokens),
            (SizeTier::Moderate, self.context.moderate_max_tokens),
            (SizeTier::Full, self.context.full_max_tokens),
        ] {
            if budget == 0 {
                return Err(ConfigError::Invalid(format!(
                    "context budget for tier '{tier}' must be positive"
                )));
            }
        }
        if self.dictionary.sources.is_empty() {
            warn!("No external dictionary sources configured; built-in rules only");
        }
        Ok(())
    }
}
