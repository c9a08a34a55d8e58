//! Configuration model for the policy layer.
//!
//! Loaded from JSON or YAML; every section falls back to its defaults so a
//! partial document (or an empty one) is valid. Device rule order is the
//! order of the `devices` list.

use std::fs;
use std::path::Path;

use joyshim_errors::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::policy::{DeviceRule, PolicyResolver, ResolvedPolicy};

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimConfig {
    pub general: GeneralSettings,
    pub ffb: FfbSettings,
    pub devices: Vec<DeviceRuleConfig>,
}

/// `[general]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Master switch; when off every device passes through untouched.
    pub enabled: bool,
    pub log_level: LogLevel,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: LogLevel::Info,
        }
    }
}

/// `[ffb]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FfbSettings {
    /// Policy for devices no rule matches.
    pub enabled: bool,
    pub log_effects: bool,
    /// Raw percentage; see [`FfbSettings::default_scale_percent`].
    pub default_scale: i64,
    /// Replay recorded parameters when an effect is re-created.
    pub auto_restart: bool,
}

impl Default for FfbSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            log_effects: true,
            default_scale: 100,
            auto_restart: true,
        }
    }
}

impl FfbSettings {
    /// `default_scale` clamped to `[0, 100]`.
    pub fn default_scale_percent(&self) -> u8 {
        ResolvedPolicy::new(self.enabled, self.default_scale).scale_percent
    }

    /// Policy applied to unmatched devices.
    pub fn default_policy(&self) -> ResolvedPolicy {
        ResolvedPolicy::new(self.enabled, self.default_scale)
    }
}

/// Verbosity of the log sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    None,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            LogLevel::None => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
        }
    }
}

/// One entry of the `devices` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRuleConfig {
    pub pattern: String,
    pub policy: RuleSetting,
}

/// Rule value as written: a percentage or a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    Scale(i64),
    Keyword(String),
}

impl DeviceRuleConfig {
    pub fn new(pattern: impl Into<String>, policy: RuleSetting) -> Self {
        Self {
            pattern: pattern.into(),
            policy,
        }
    }

    /// Converts to a runtime rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] for unknown keywords.
    pub fn to_rule(&self) -> Result<DeviceRule, ConfigError> {
        match &self.policy {
            RuleSetting::Scale(percent) => Ok(DeviceRule::new(
                self.pattern.clone(),
                ResolvedPolicy::from_percent(*percent),
            )),
            RuleSetting::Keyword(value) => DeviceRule::parse(self.pattern.clone(), value),
        }
    }
}

impl ShimConfig {
    /// Loads a configuration file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// I/O failures, unknown extensions and malformed documents.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let content = fs::read_to_string(path)?;
        let config = match extension.as_str() {
            "json" => Self::from_json_str(&content)?,
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        tracing::debug!(
            path = %path.display(),
            rules = config.devices.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::parse(e.to_string()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        // An empty YAML document deserializes to unit, not a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::parse(e.to_string()))
    }

    /// Runtime rules in priority order.
    ///
    /// # Errors
    ///
    /// The first rule whose value cannot be parsed.
    pub fn rules(&self) -> Result<Vec<DeviceRule>, ConfigError> {
        self.devices.iter().map(DeviceRuleConfig::to_rule).collect()
    }
}

impl PolicyResolver {
    /// Builds a resolver from a loaded configuration.
    ///
    /// With `general.enabled` off the layer is a pass-through: no rules and
    /// a full-strength default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] for any unparseable rule value.
    pub fn from_config(config: &ShimConfig) -> Result<Self, ConfigError> {
        if !config.general.enabled {
            tracing::info!("Policy layer disabled, all devices pass through");
            return Ok(Self::new(Vec::new(), ResolvedPolicy::allow()));
        }

        let rules = config.rules()?;
        let default_policy = config.ffb.default_policy();
        tracing::info!(
            rules = rules.len(),
            default = %default_policy,
            "Policy resolver configured"
        );
        Ok(Self::new(rules, default_policy))
    }
}
