//! Configuration schema types for `agif.toml`

use crate::animated::ImageOptions;
use crate::cache::{CachePolicy, DEFAULT_EAGER_LIMIT_BYTES, DEFAULT_PREFETCH_WINDOW};
use crate::timing::DelayPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Frame delay normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delays below this many milliseconds are replaced (0 keeps all delays)
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    /// Replacement for delays below `min_delay_ms`
    #[serde(default = "default_fallback_delay_ms")]
    pub fallback_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            fallback_delay_ms: default_fallback_delay_ms(),
        }
    }
}

fn default_min_delay_ms() -> u64 {
    20
}

fn default_fallback_delay_ms() -> u64 {
    100
}

/// Decoded frame cache limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_eager_limit_bytes")]
    pub eager_limit_bytes: u64,
    #[serde(default = "default_prefetch_window")]
    pub prefetch_window: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            eager_limit_bytes: default_eager_limit_bytes(),
            prefetch_window: default_prefetch_window(),
        }
    }
}

fn default_eager_limit_bytes() -> u64 {
    DEFAULT_EAGER_LIMIT_BYTES
}

fn default_prefetch_window() -> usize {
    DEFAULT_PREFETCH_WINDOW
}

/// Defaults for files written by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Nearest-neighbor upscale factor for extracted frames and sheets
    #[serde(default = "default_scale")]
    pub scale: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
        }
    }
}

fn default_scale() -> u8 {
    1
}

/// Root of `agif.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgifConfig {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "cache.prefetch_window")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agif.toml: '{}' {}", self.field, self.message)
    }
}

impl AgifConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.timing.fallback_delay_ms == 0 {
            errors.push(ConfigValidationError {
                field: "timing.fallback_delay_ms".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.cache.prefetch_window == 0 {
            errors.push(ConfigValidationError {
                field: "cache.prefetch_window".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if !(1..=16).contains(&self.output.scale) {
            errors.push(ConfigValidationError {
                field: "output.scale".to_string(),
                message: "must be between 1 and 16".to_string(),
            });
        }

        errors
    }

    /// Decoding options derived from the timing and cache sections
    pub fn image_options(&self) -> ImageOptions {
        ImageOptions {
            delay: DelayPolicy {
                min_delay: Duration::from_millis(self.timing.min_delay_ms),
                fallback_delay: Duration::from_millis(self.timing.fallback_delay_ms),
            },
            cache: CachePolicy {
                eager_limit_bytes: self.cache.eager_limit_bytes,
                prefetch_window: self.cache.prefetch_window,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: AgifConfig = toml::from_str("").unwrap();
        assert_eq!(config, AgifConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: AgifConfig = toml::from_str(
            r#"
[cache]
prefetch_window = 4
"#,
        )
        .unwrap();
        assert_eq!(config.cache.prefetch_window, 4);
        assert_eq!(config.cache.eager_limit_bytes, DEFAULT_EAGER_LIMIT_BYTES);
        assert_eq!(config.timing.fallback_delay_ms, 100);
    }

    #[test]
    fn test_default_options_match_library_defaults() {
        assert_eq!(AgifConfig::default().image_options(), ImageOptions::default());
    }

    #[test]
    fn test_image_options_from_config() {
        let config: AgifConfig = toml::from_str(
            r#"
[timing]
min_delay_ms = 0
fallback_delay_ms = 50

[cache]
eager_limit_bytes = 1024
"#,
        )
        .unwrap();
        let options = config.image_options();
        assert_eq!(options.delay.min_delay, Duration::ZERO);
        assert_eq!(options.delay.fallback_delay, Duration::from_millis(50));
        assert_eq!(options.cache.eager_limit_bytes, 1024);
    }

    #[test]
    fn test_validation_errors() {
        let config: AgifConfig = toml::from_str(
            r#"
[timing]
fallback_delay_ms = 0

[cache]
prefetch_window = 0

[output]
scale = 17
"#,
        )
        .unwrap();
        let errors = config.validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["timing.fallback_delay_ms", "cache.prefetch_window", "output.scale"]
        );
        assert_eq!(
            errors[1].to_string(),
            "agif.toml: 'cache.prefetch_window' must be at least 1"
        );
    }

    #[test]
    fn test_unknown_field_type_is_parse_error() {
        let result: Result<AgifConfig, _> = toml::from_str("[cache]\nprefetch_window = \"ten\"");
        assert!(result.is_err());
    }
}
