use std::{collections::HashMap, fmt::Display, str::FromStr};

use envconfig::Envconfig;

/// Which set of key-to-path rules the translator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationPolicy {
    /// Tag pages are skipped and one designated page triggers a wildcard.
    #[default]
    Filtered,
    /// Every key is invalidated, index files also invalidate their directory.
    Unfiltered,
}

impl FromStr for TranslationPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filtered" => Ok(TranslationPolicy::Filtered),
            "unfiltered" => Ok(TranslationPolicy::Unfiltered),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

impl Display for TranslationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationPolicy::Filtered => write!(f, "filtered"),
            TranslationPolicy::Unfiltered => write!(f, "unfiltered"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config from environment: {0}")]
    Env(#[from] envconfig::Error),
    #[error("CLOUDFRONT_DISTRIBUTION_ID is set but empty")]
    EmptyDistributionId,
    #[error("Unknown translation policy: {0} (expected `filtered` or `unfiltered`)")]
    UnknownPolicy(String),
    #[error("Wildcard path must start with '/': {0}")]
    InvalidWildcardPath(String),
    #[error("{0} must not be empty")]
    EmptyValue(&'static str),
}

#[derive(Debug, Clone, Envconfig)]
pub struct Config {
    #[envconfig(from = "CLOUDFRONT_DISTRIBUTION_ID")]
    pub distribution_id: String,
    #[envconfig(from = "CF_INVALIDATE_POLICY", default = "filtered")]
    pub policy: TranslationPolicy,
    #[envconfig(
        from = "CF_INVALIDATE_WILDCARD_TRIGGER",
        default = "tag/book-notes/index.html"
    )]
    pub wildcard_trigger: String,
    #[envconfig(from = "CF_INVALIDATE_IGNORE_PREFIX", default = "tag/")]
    pub ignore_prefix: String,
    #[envconfig(from = "CF_INVALIDATE_WILDCARD_PATH", default = "/tag/*")]
    pub wildcard_path: String,
    /// Build batches but never call CloudFront.
    #[envconfig(from = "CF_INVALIDATE_DRY_RUN", default = "false")]
    pub dry_run: bool,
    #[envconfig(from = "CF_INVALIDATE_LOG_LEVEL", default = "info")]
    pub log_level: String,
}

impl Config {
    /// Load from the process environment and reject unusable values up front.
    pub fn load() -> Result<Config, ConfigError> {
        let config = Config::init_from_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Result<Config, ConfigError> {
        let config = Config::init_from_hashmap(vars)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.distribution_id.trim().is_empty() {
            return Err(ConfigError::EmptyDistributionId);
        }
        if self.wildcard_trigger.is_empty() {
            return Err(ConfigError::EmptyValue("CF_INVALIDATE_WILDCARD_TRIGGER"));
        }
        if self.ignore_prefix.is_empty() {
            return Err(ConfigError::EmptyValue("CF_INVALIDATE_IGNORE_PREFIX"));
        }
        if !self.wildcard_path.starts_with('/') {
            return Err(ConfigError::InvalidWildcardPath(self.wildcard_path.clone()));
        }
        Ok(())
    }
}
