//! Engine configuration.

use deha_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::PoseCatalog;
use crate::smoother::DEFAULT_WINDOW;

/// Tunables for the session controller and its renderer payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Raw scores averaged into the displayed score. Larger is steadier,
    /// smaller follows form changes faster.
    pub smoothing_window: usize,

    /// Corrections a renderer should show at once
    pub max_displayed_corrections: usize,

    /// Sole feedback item while no body is detected
    pub waiting_message: String,

    /// Message a renderer shows when a detected pose has no corrections
    pub all_clear_message: String,

    /// Activation key of the pose selected at startup
    pub initial_pose_key: char,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_WINDOW,
            max_displayed_corrections: 3,
            waiting_message: "Waiting for body detection…".to_string(),
            all_clear_message: "Form looks good — hold it!".to_string(),
            initial_pose_key: '1',
        }
    }
}

impl EngineConfig {
    /// Load configuration from file
    pub fn from_file(path: &str) -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("DEHA"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load from environment variables
    pub fn from_env() -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("DEHA"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load from an optional file plus environment, then validate against
    /// `catalog`
    pub fn load(path: Option<&str>, catalog: &PoseCatalog) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
        .map_err(|e| Error::Config(e.to_string()))?;

        config.validate(catalog)?;
        Ok(config)
    }

    pub fn validate(&self, catalog: &PoseCatalog) -> Result<()> {
        if self.smoothing_window == 0 {
            return Err(Error::Config("smoothing_window must be at least 1".into()));
        }
        if catalog.by_key(self.initial_pose_key).is_none() {
            return Err(Error::UnknownPose(self.initial_pose_key.to_string()));
        }
        Ok(())
    }
}
