//! Configuration for remap passes.

use crate::WindowPolicy;
use serde::{Deserialize, Serialize};

/// Configuration for scatter and windowing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RemapConfig {
    /// Value written to cells without data. NaN unless overridden.
    pub fill_value: f64,

    /// Behaviour for windows that extend past the raster.
    pub window_policy: WindowPolicy,
}

impl Default for RemapConfig {
    fn default() -> Self {
        Self {
            fill_value: f64::NAN,
            window_policy: WindowPolicy::Reject,
        }
    }
}

impl RemapConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `GRIDTOOL_FILL_VALUE` and `GRIDTOOL_WINDOW_POLICY` over `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("GRIDTOOL_FILL_VALUE") {
            if let Ok(fill) = val.parse() {
                self.fill_value = fill;
            }
        }

        if let Ok(val) = std::env::var("GRIDTOOL_WINDOW_POLICY") {
            if let Ok(policy) = val.parse() {
                self.window_policy = policy;
            }
        }

        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.fill_value.is_infinite() {
            return Err("fill_value must be finite or NaN".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RemapConfig::default();
        assert!(config.fill_value.is_nan());
        assert_eq!(config.window_policy, WindowPolicy::Reject);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial() {
        let config: RemapConfig = serde_yaml::from_str("window_policy: clamp\n").unwrap();
        assert_eq!(config.window_policy, WindowPolicy::Clamp);
        assert!(config.fill_value.is_nan());

        let config: RemapConfig = serde_yaml::from_str("fill_value: -9999.0\n").unwrap();
        assert_eq!(config.fill_value, -9999.0);
    }

    #[test]
    fn test_infinite_fill_rejected() {
        let config = RemapConfig {
            fill_value: f64::INFINITY,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
