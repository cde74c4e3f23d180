//! Economy-wide configuration.

use golddust_session::SessionConfig;
use golddust_store::WritePolicy;
use serde::{Deserialize, Serialize};

use crate::GoldDustError;

/// Settings for every manager an [`Economy`](crate::Economy) builds.
///
/// Missing sections and fields fall back to their defaults, so `{}` is
/// a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub session: SessionConfig,
    pub write: WritePolicy,
}

impl EconomyConfig {
    /// Parses a JSON configuration document.
    ///
    /// ```rust
    /// use golddust::EconomyConfig;
    ///
    /// let config = EconomyConfig::from_json_str(r#"{"session": {"ttl_secs": 600}}"#).unwrap();
    /// assert_eq!(config.session.ttl_secs, 600);
    /// assert_eq!(config.write.max_attempts, 8);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, GoldDustError> {
        serde_json::from_str(json).map_err(GoldDustError::Config)
    }
}
