//! Presenter configuration
//!
//! ```toml
//! concurrent_presentation = "queue"
//! legacy_status_bar_height = 20.0
//!
//! [gesture]
//! velocity_threshold = 1200.0
//! ```

use cardstack_core::{CardError, Result, LEGACY_STATUS_BAR_HEIGHT};
use serde::{Deserialize, Serialize};

use crate::gesture::GestureConfig;

/// What happens when a card is presented while another is shown and the new
/// card does not replace it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrentPresentation {
    /// Fail with [`CardError::AlreadyPresenting`]
    #[default]
    Reject,
    /// Present after the current card is dismissed
    Queue,
    /// Layer the new card on top immediately
    Stack,
}

/// Settings for one [`crate::CardManager`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    pub concurrent_presentation: ConcurrentPresentation,
    pub gesture: GestureConfig,
    /// Safe-area height matched by `InsetCondition::LegacyStatusBarSafeArea`
    pub legacy_status_bar_height: f32,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            concurrent_presentation: ConcurrentPresentation::default(),
            gesture: GestureConfig::default(),
            legacy_status_bar_height: LEGACY_STATUS_BAR_HEIGHT,
        }
    }
}

impl PresenterConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| CardError::Config(e.to_string()))
    }

    pub fn with_concurrent_presentation(mut self, policy: ConcurrentPresentation) -> Self {
        self.concurrent_presentation = policy;
        self
    }
}
