//! Designer-facing torpedo configuration.
//!
//! Read once when the projectile is created and constant afterwards.
//! Every field has a default, so partial JSON documents are accepted.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::LayerMask;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorpedoConfig {
    /// Travel speed (world units per second).
    pub velocity: f32,
    /// Initial heading. Only x/y are reflected; z is carried as-is until the
    /// first bounce zeroes it.
    pub direction: Vec3,
    /// Maximum life in seconds.
    pub time_to_live: f32,
    /// Seconds before expiry over which the sprite fades out.
    pub fade_time: f32,
    /// Bounces allowed before the next reflective contact forces an impact.
    pub number_reflections: u32,
    /// Collision layers that cause reflections.
    pub reflective_layers: LayerMask,
}

impl Default for TorpedoConfig {
    fn default() -> Self {
        Self {
            velocity: DEFAULT_VELOCITY,
            direction: Vec3::ZERO,
            time_to_live: DEFAULT_TIME_TO_LIVE,
            fade_time: DEFAULT_FADE_TIME,
            number_reflections: DEFAULT_NUMBER_REFLECTIONS,
            reflective_layers: LayerMask::NONE,
        }
    }
}

impl TorpedoConfig {
    /// Reject values no designer could have meant.
    ///
    /// A zero reflection budget or zero velocity is valid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.velocity.is_finite() {
            return Err(format!("velocity must be finite, got {}", self.velocity));
        }
        if !self.direction.is_finite() {
            return Err(format!("direction must be finite, got {}", self.direction));
        }
        if !self.time_to_live.is_finite() || self.time_to_live < 0.0 {
            return Err(format!(
                "time_to_live must be a non-negative number, got {}",
                self.time_to_live
            ));
        }
        if !self.fade_time.is_finite() || self.fade_time < 0.0 {
            return Err(format!(
                "fade_time must be a non-negative number, got {}",
                self.fade_time
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: TorpedoConfig =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse torpedo config: {e}"))?;
        config.validate()?;
        Ok(config)
    }
}
