//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! [cache]
//! enabled = true
//! ttl_seconds = 3600
//!
//! [bazi]
//! zi_hour = "split_late_zi"
//!
//! [xuankong]
//! tolerance_degrees = 3.0
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tianji_bazi::BaziConfig;
use tianji_xuankong::XuankongConfig;

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Entry lifetime.
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 3600,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

/// Top-level configuration for [`crate::Engine`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub cache: CacheConfig,
    pub bazi: BaziConfig,
    pub xuankong: XuankongConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.cache.enabled && self.cache.ttl_seconds == 0 {
            return Err(EngineError::InvalidConfig(
                "cache.ttl_seconds must be positive".into(),
            ));
        }
        self.bazi
            .validate()
            .map_err(|e| EngineError::InvalidConfig(format!("bazi: {e}")))?;
        self.xuankong
            .validate()
            .map_err(|e| EngineError::InvalidConfig(format!("xuankong: {e}")))?;
        Ok(())
    }

    /// Parse and validate a TOML document. Missing sections take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        let config: Self =
            toml::from_str(s).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tianji_bazi::ZiHourPolicy;
    use tianji_xuankong::EvaluationProfile;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn sections_override_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [cache]
            ttl_seconds = 60

            [bazi]
            zi_hour = "split_late_zi"
            luck_pillar_count = 10

            [xuankong]
            profile = "conservative"
            replace_on_fuyin = true
            replace_on_facing_he_shi = true
            "#,
        )
        .unwrap();
        assert_eq!(config.cache.ttl(), Duration::from_secs(60));
        assert!(config.cache.enabled);
        assert_eq!(config.bazi.zi_hour, ZiHourPolicy::SplitLateZi);
        assert_eq!(config.bazi.luck_pillar_count, 10);
        assert_eq!(config.xuankong.profile, EvaluationProfile::Conservative);
        assert!(config.xuankong.replace_on_fuyin);
        assert!(config.xuankong.replace_on_facing_he_shi);
        assert!(!config.xuankong.replace_on_combined_direction);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = EngineConfig::from_toml_str("[xuankong]\ntolerance_degrees = 12.0\n").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
        let err = EngineConfig::from_toml_str("[cache]\nttl_seconds = 0\n").unwrap_err();
        assert_eq!(err.code(), "E_CONFIG");
        assert!(EngineConfig::from_toml_str("[bazi]\nzi_hour = \"sometimes\"\n").is_err());
    }
}
