//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use crate::algorithms::Algorithm;
use crate::constants::{
    ARRAY_SIZE_STEP, DEFAULT_ARRAY_SIZE, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_GRACE_MS,
    DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE, DEFAULT_SAMPLE_EVERY, MAX_ARRAY_SIZE, MAX_MAX_VALUE,
    MAX_ADJUSTMENT_STEPS, MAX_VALUE_STEP, MIN_ARRAY_SIZE, MIN_MAX_VALUE, modes,
};
use crate::utils::validation::validate_input_bounds;

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub display: DisplayConfig,
    pub input: InputConfig,
    pub comparison: ComparisonConfig,
    pub animation: AnimationConfig,
}

/// Which front end the binary runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Compare,
    Animate,
}

impl FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            modes::COMPARE => Ok(Self::Compare),
            modes::ANIMATE => Ok(Self::Animate),
            _ => Err(ConfigError::InvalidValue("SORTSCOPE_MODE".to_string())),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub rust_log: String,
    pub mode: RunMode,
    /// Print the comparison report as JSON instead of a table
    pub json_report: bool,
}

/// Generated input configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputConfig {
    pub size: usize,
    pub min_value: i64,
    pub max_value: i64,
    pub ascending: bool,
}

/// Comparison mode configuration
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    /// Record an elapsed-time sample every N steps
    pub sample_every: u64,
    /// Cancel the comparison after this long (runs to completion when unset)
    pub cancel_after: Option<Duration>,
    /// How long cancelled drivers get to report back
    pub grace: Duration,
}

/// Animation mode configuration
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    pub algorithm: Algorithm,
    pub frame_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            display: DisplayConfig::from_env()?,
            input: InputConfig::from_env()?,
            comparison: ComparisonConfig::from_env()?,
            animation: AnimationConfig::from_env()?,
        })
    }
}

/// Parse an optional environment variable, falling back to `default`
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

impl DisplayConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            mode: env::var("SORTSCOPE_MODE")
                .unwrap_or_else(|_| modes::COMPARE.to_string())
                .parse()?,
            json_report: parse_var("SORTSCOPE_JSON_REPORT", false)?,
        })
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_ARRAY_SIZE,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            ascending: true,
        }
    }
}

impl InputConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self {
            size: parse_var("SORTSCOPE_ARRAY_SIZE", DEFAULT_ARRAY_SIZE)?,
            min_value: parse_var("SORTSCOPE_MIN_VALUE", DEFAULT_MIN_VALUE)?,
            max_value: parse_var("SORTSCOPE_MAX_VALUE", DEFAULT_MAX_VALUE)?,
            ascending: parse_var("SORTSCOPE_ASCENDING", true)?,
        };
        config.adjust(
            parse_var("SORTSCOPE_SIZE_STEPS", 0)?,
            parse_var("SORTSCOPE_MAX_STEPS", 0)?,
        );

        validate_input_bounds(config.size, config.min_value, config.max_value)
            .map_err(|reason| ConfigError::InvalidValue(reason.to_string()))?;

        Ok(config)
    }

    /// Apply signed step counts: positive grows, negative shrinks
    pub fn adjust(&mut self, size_steps: i32, max_steps: i32) {
        for _ in 0..size_steps.unsigned_abs().min(MAX_ADJUSTMENT_STEPS) {
            if size_steps > 0 {
                self.grow();
            } else {
                self.shrink();
            }
        }
        for _ in 0..max_steps.unsigned_abs().min(MAX_ADJUSTMENT_STEPS) {
            if max_steps > 0 {
                self.raise_max();
            } else {
                self.lower_max();
            }
        }
    }

    /// Add one size step, saturating at the largest supported array
    pub fn grow(&mut self) {
        self.size = (self.size + ARRAY_SIZE_STEP).min(MAX_ARRAY_SIZE);
    }

    /// Remove one size step, saturating at the smallest supported array
    pub fn shrink(&mut self) {
        self.size = self.size.saturating_sub(ARRAY_SIZE_STEP).max(MIN_ARRAY_SIZE);
    }

    /// Raise the maximum generated value by one step
    pub fn raise_max(&mut self) {
        self.max_value = self.max_value.saturating_add(MAX_VALUE_STEP).min(MAX_MAX_VALUE);
    }

    /// Lower the maximum generated value by one step
    pub fn lower_max(&mut self) {
        self.max_value = self.max_value.saturating_sub(MAX_VALUE_STEP).max(MIN_MAX_VALUE);
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            sample_every: DEFAULT_SAMPLE_EVERY,
            cancel_after: None,
            grace: Duration::from_millis(DEFAULT_GRACE_MS),
        }
    }
}

impl ComparisonConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let sample_every = parse_var("SORTSCOPE_SAMPLE_EVERY", DEFAULT_SAMPLE_EVERY)?;
        if sample_every == 0 {
            return Err(ConfigError::InvalidValue("SORTSCOPE_SAMPLE_EVERY".to_string()));
        }

        let cancel_after = match env::var("SORTSCOPE_CANCEL_AFTER_MS") {
            Ok(raw) => Some(Duration::from_millis(raw.trim().parse().map_err(|_| {
                ConfigError::InvalidValue("SORTSCOPE_CANCEL_AFTER_MS".to_string())
            })?)),
            Err(_) => None,
        };

        Ok(Self {
            sample_every,
            cancel_after,
            grace: Duration::from_millis(parse_var("SORTSCOPE_GRACE_MS", DEFAULT_GRACE_MS)?),
        })
    }
}

impl AnimationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let algorithm = match env::var("SORTSCOPE_ALGORITHM") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SORTSCOPE_ALGORITHM".to_string()))?,
            Err(_) => Algorithm::Bubble,
        };

        Ok(Self {
            algorithm,
            frame_interval: Duration::from_millis(parse_var(
                "SORTSCOPE_FRAME_INTERVAL_MS",
                DEFAULT_FRAME_INTERVAL_MS,
            )?),
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
