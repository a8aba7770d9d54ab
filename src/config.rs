//! Classifier settings.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Side length of the square sampled from the image center.
pub const DEFAULT_SAMPLE_SIZE: u32 = 50;

/// Warmth magnitude beyond which a sample stops being neutral.
pub const DEFAULT_WARMTH_THRESHOLD: f64 = 0.1;

/// What to do when the sample window does not fit inside the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmallImagePolicy {
    /// Shrink the window to the image bounds; only an empty window is an error.
    #[default]
    Clamp,
    /// Refuse any image whose full window would leave the bounds.
    Reject,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub sample_size: u32,
    pub warmth_threshold: f64,
    pub small_image_policy: SmallImagePolicy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            warmth_threshold: DEFAULT_WARMTH_THRESHOLD,
            small_image_policy: SmallImagePolicy::Clamp,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(Error::InvalidConfig {
                name: "sample_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !self.warmth_threshold.is_finite() || self.warmth_threshold < 0.0 {
            return Err(Error::InvalidConfig {
                name: "warmth_threshold".into(),
                reason: format!("{} is not a finite non-negative number", self.warmth_threshold),
            });
        }
        Ok(())
    }
}
