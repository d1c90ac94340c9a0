use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::billing::DEFAULT_SERVICES;
use crate::core::chart::{self, CHART_ENDPOINT_ENV};
use crate::core::i18n::Lang;
use crate::core::kind::ResourceKind;
use crate::core::matcher::DEFAULT_THRESHOLD;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_format")]
    pub default_format: String,
    #[serde(default = "default_color")]
    pub color: String,
    /// Chart endpoint shared by every kind unless overridden
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_endpoint: Option<String>,
}

fn default_lang() -> String {
    "en".to_string()
}
fn default_format() -> String {
    "text".to_string()
}
fn default_color() -> String {
    "auto".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            default_format: default_format(),
            color: default_color(),
            chart_endpoint: None,
        }
    }
}

/// Per-kind stats settings, the `[sqs]` and `[dynamodb]` tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindConfig {
    /// 0 means the default threshold
    #[serde(default = "default_max_border")]
    pub max_border: usize,
    /// Empty means the kind's default metric list
    #[serde(default)]
    pub metrics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_endpoint: Option<String>,
}

fn default_max_border() -> usize {
    DEFAULT_THRESHOLD
}

impl Default for KindConfig {
    fn default() -> Self {
        Self {
            max_border: default_max_border(),
            metrics: Vec::new(),
            chart_endpoint: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostConfig {
    #[serde(default = "default_services")]
    pub services: Vec<String>,
}

fn default_services() -> Vec<String> {
    DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect()
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            services: default_services(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub sqs: KindConfig,
    #[serde(default)]
    pub dynamodb: KindConfig,
    #[serde(default)]
    pub cost: CostConfig,
}

impl AppConfig {
    /// Get the config file path, respecting XDG_CONFIG_HOME
    pub fn config_path() -> PathBuf {
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            });
        config_dir.join("bobo-stats").join("config.toml")
    }

    /// Load config from the default path, falling back to defaults if not found
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    pub fn kind_config(&self, kind: ResourceKind) -> &KindConfig {
        match kind {
            ResourceKind::Queue => &self.sqs,
            ResourceKind::Table => &self.dynamodb,
        }
    }

    /// `BOBO_LANG` wins over the config file.
    pub fn lang(&self) -> Lang {
        Lang::from_env().unwrap_or_else(|| Lang::from_code(&self.settings.lang))
    }

    /// Chart endpoint used when neither the request nor the kind names one:
    /// `[settings] chart_endpoint`, else `CHART_ANGEL_ENDPOINT`.
    pub fn default_chart_endpoint(&self) -> Option<String> {
        self.settings
            .chart_endpoint
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                std::env::var(CHART_ENDPOINT_ENV)
                    .ok()
                    .filter(|url| !url.trim().is_empty())
            })
    }

    /// Validate the config
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !Lang::is_known_code(&self.settings.lang) {
            issues.push(format!(
                "Invalid lang: '{}' (must be 'en' or 'ja')",
                self.settings.lang
            ));
        }
        if !["text", "json"].contains(&self.settings.default_format.as_str()) {
            issues.push(format!(
                "Invalid default_format: '{}' (must be 'text' or 'json')",
                self.settings.default_format
            ));
        }
        if !["auto", "always", "never"].contains(&self.settings.color.as_str()) {
            issues.push(format!(
                "Invalid color: '{}' (must be 'auto', 'always', or 'never')",
                self.settings.color
            ));
        }
        if let Some(url) = &self.settings.chart_endpoint {
            if chart::validate_endpoint(url, Lang::English).is_err() {
                issues.push(format!("[settings] invalid chart_endpoint: '{}'", url));
            }
        }

        for &kind in ResourceKind::all() {
            let section = kind.command();
            let kc = self.kind_config(kind);
            if let Some(url) = &kc.chart_endpoint {
                if chart::validate_endpoint(url, Lang::English).is_err() {
                    issues.push(format!("[{}] invalid chart_endpoint: '{}'", section, url));
                }
            }
            for metric in &kc.metrics {
                if metric.trim().is_empty() {
                    issues.push(format!("[{}] empty metric name", section));
                }
            }
        }

        if self.cost.services.iter().any(|s| s.trim().is_empty()) {
            issues.push("[cost] empty service name".to_string());
        }
        issues
    }
}
