//! Run configuration
//!
//! The file model ([`ConfigFile`]) mirrors the TOML layout and fills gaps
//! with serde defaults. [`RunConfiguration`] is the validated, read-only
//! value the batch works from.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use trendalert_core::ScoreBasis;
use trendalert_gateway::{YAHOO_BASE_URL, parse_base_url};
use trendalert_ports::NotificationTarget;

pub const SYMBOL_PLACEHOLDER: &str = "{insert-stock-symbol}";
pub const WEBHOOK_PLACEHOLDER: &str = "{insert-discord-webhook-url}";

/// Written on first run when no configuration file exists
pub const TEMPLATE: &str = r#"[general]
symbols = ["{insert-stock-symbol}"]
webhook_url = "{insert-discord-webhook-url}"

[model_tuning]
days = 90
degree = 4
zlimit = 2.0
# "actual" scores the last close against the linear forecast,
# "forecast" scores the polynomial/linear forecast disagreement
score_basis = "actual"

[network]
request_timeout_secs = 30
data_source_url = "https://query1.finance.yahoo.com"

[chart]
width = 1600
height = 900
"#;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{field} still holds the placeholder value, edit the config file")]
    Placeholder { field: &'static str },
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("No config found, a template was written to {path}; fill it in and run again")]
    TemplateCreated { path: String },
}

// ============================================================================
// File model
// ============================================================================

/// Root of the TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub general: GeneralConfig,
    #[serde(default)]
    pub model_tuning: ModelTuningConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Instruments evaluated in order
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default)]
    pub webhook_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelTuningConfig {
    /// Trailing calendar days of history
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_degree")]
    pub degree: usize,
    #[serde(default = "default_zlimit")]
    pub zlimit: f64,
    #[serde(default)]
    pub score_basis: ScoreBasis,
}

impl Default for ModelTuningConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            degree: default_degree(),
            zlimit: default_zlimit(),
            score_basis: ScoreBasis::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_data_source_url")]
    pub data_source_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
            data_source_url: default_data_source_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_days() -> u32 {
    90
}

fn default_degree() -> usize {
    4
}

fn default_zlimit() -> f64 {
    2.0
}

fn default_timeout() -> u64 {
    30
}

fn default_data_source_url() -> String {
    YAHOO_BASE_URL.to_string()
}

fn default_width() -> u32 {
    1600
}

fn default_height() -> u32 {
    900
}

// ============================================================================
// Runtime configuration
// ============================================================================

/// Validated configuration for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfiguration {
    pub symbols: Vec<String>,
    pub window_days: u32,
    pub polynomial_degree: usize,
    pub z_score_threshold: f64,
    pub score_basis: ScoreBasis,
    pub notification_target: NotificationTarget,
    pub request_timeout: Duration,
    pub data_source_url: String,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl RunConfiguration {
    /// Configuration with default tuning for the given instruments
    pub fn new(symbols: Vec<String>, notification_target: NotificationTarget) -> Self {
        Self {
            symbols,
            window_days: default_days(),
            polynomial_degree: default_degree(),
            z_score_threshold: default_zlimit(),
            score_basis: ScoreBasis::default(),
            notification_target,
            request_timeout: Duration::from_secs(default_timeout()),
            data_source_url: default_data_source_url(),
            chart_width: default_width(),
            chart_height: default_height(),
        }
    }

    pub fn with_degree(mut self, degree: usize) -> Self {
        self.polynomial_degree = degree;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.z_score_threshold = threshold;
        self
    }

    pub fn with_score_basis(mut self, basis: ScoreBasis) -> Self {
        self.score_basis = basis;
        self
    }

    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }
}

impl TryFrom<ConfigFile> for RunConfiguration {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        file.validate()?;

        let symbols = file
            .general
            .symbols
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        Ok(Self {
            symbols,
            window_days: file.model_tuning.days,
            polynomial_degree: file.model_tuning.degree,
            z_score_threshold: file.model_tuning.zlimit,
            score_basis: file.model_tuning.score_basis,
            notification_target: NotificationTarget::new(file.general.webhook_url.trim()),
            request_timeout: Duration::from_secs(file.network.request_timeout_secs),
            data_source_url: file.network.data_source_url.trim().to_string(),
            chart_width: file.chart.width,
            chart_height: file.chart.height,
        })
    }
}

impl ConfigFile {
    /// Reject placeholders and values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.symbols.is_empty() {
            return Err(invalid("general.symbols", "at least one symbol is required"));
        }
        for symbol in &self.general.symbols {
            let symbol = symbol.trim();
            if symbol.is_empty() {
                return Err(invalid("general.symbols", "symbols must not be empty"));
            }
            if symbol.eq_ignore_ascii_case(SYMBOL_PLACEHOLDER) {
                return Err(ConfigError::Placeholder {
                    field: "general.symbols",
                });
            }
        }

        let webhook = self.general.webhook_url.trim();
        if webhook.is_empty() {
            return Err(invalid("general.webhook_url", "must not be empty"));
        }
        if webhook.eq_ignore_ascii_case(WEBHOOK_PLACEHOLDER) {
            return Err(ConfigError::Placeholder {
                field: "general.webhook_url",
            });
        }

        let tuning = &self.model_tuning;
        if tuning.days == 0 {
            return Err(invalid("model_tuning.days", "must be positive"));
        }
        if tuning.degree == 0 {
            return Err(invalid("model_tuning.degree", "must be at least 1"));
        }
        if !tuning.zlimit.is_finite() || tuning.zlimit < 0.0 {
            return Err(invalid(
                "model_tuning.zlimit",
                format!("must be a finite, non-negative number (got {})", tuning.zlimit),
            ));
        }

        if self.network.request_timeout_secs == 0 {
            return Err(invalid("network.request_timeout_secs", "must be positive"));
        }
        if let Err(e) = parse_base_url(self.network.data_source_url.trim()) {
            return Err(invalid("network.data_source_url", e.to_string()));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(invalid("chart", "width and height must be positive"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Parse configuration from a TOML string
pub fn load_config_from_str(toml: &str) -> Result<RunConfiguration, ConfigError> {
    let file: ConfigFile = toml::from_str(toml)?;
    RunConfiguration::try_from(file)
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfiguration, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load the file, or write [`TEMPLATE`] and report [`ConfigError::TemplateCreated`]
pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<RunConfiguration, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, TEMPLATE)?;
        return Err(ConfigError::TemplateCreated {
            path: path.display().to_string(),
        });
    }
    load_config(path)
}
