//! Scenario configuration for arena runs.
//!
//! A scenario describes the play area, its obstacles and targets, and the
//! torpedo being launched. It is plain serde data so it can be loaded from
//! JSON; missing fields fall back to the built-in demo scenario.

use std::fs;
use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use torpedo_core::config::TorpedoConfig;
use torpedo_core::types::LayerMask;

/// Collision layer used for the demo obstacles.
pub const REFLECTIVE_LAYER: u8 = 8;

/// Axis-aligned obstacle placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub min: Vec2,
    pub max: Vec2,
    #[serde(default = "default_obstacle_layer")]
    pub layer: u8,
}

fn default_obstacle_layer() -> u8 {
    REFLECTIVE_LAYER
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// RNG seed for target scattering. Same seed = same layout.
    pub seed: u64,
    /// Fixed frames per second.
    pub frame_rate: u32,
    pub view_center: Vec2,
    pub view_half_extents: Vec2,
    /// Whether a primary camera exists. Without one, no boundary bounces.
    pub camera: bool,
    pub obstacles: Vec<ObstacleSpec>,
    /// Explicitly placed target centers, in scene order.
    pub targets: Vec<Vec2>,
    /// Additional targets scattered over the upper part of the view.
    pub random_targets: u32,
    pub target_radius: f32,
    /// Untagged circles that guidance must ignore.
    pub scenery_count: u32,
    pub launch_position: Vec3,
    /// Hard cap on frames for `run_to_completion`.
    pub max_frames: u32,
    pub torpedo: TorpedoConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frame_rate: 60,
            view_center: Vec2::ZERO,
            view_half_extents: Vec2::new(8.0, 4.5),
            camera: true,
            obstacles: vec![
                ObstacleSpec {
                    min: Vec2::new(-5.0, -1.0),
                    max: Vec2::new(-4.5, 1.5),
                    layer: REFLECTIVE_LAYER,
                },
                ObstacleSpec {
                    min: Vec2::new(4.5, -1.5),
                    max: Vec2::new(5.0, 1.0),
                    layer: REFLECTIVE_LAYER,
                },
            ],
            targets: Vec::new(),
            random_targets: 3,
            target_radius: 0.4,
            scenery_count: 2,
            launch_position: Vec3::new(0.0, -3.5, 0.0),
            max_frames: 1200,
            torpedo: TorpedoConfig {
                velocity: 4.0,
                direction: Vec3::new(0.6, 0.8, 0.0),
                reflective_layers: LayerMask::from_layers(&[REFLECTIVE_LAYER]),
                ..Default::default()
            },
        }
    }
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.frame_rate == 0 {
            return Err("frame_rate must be positive".to_string());
        }
        if !(self.view_half_extents.x > 0.0 && self.view_half_extents.y > 0.0)
            || !self.view_half_extents.is_finite()
        {
            return Err(format!(
                "view_half_extents must be positive, got {}",
                self.view_half_extents
            ));
        }
        if !(self.target_radius > 0.0) || !self.target_radius.is_finite() {
            return Err(format!("target_radius must be positive, got {}", self.target_radius));
        }
        for (i, obstacle) in self.obstacles.iter().enumerate() {
            if !obstacle.min.is_finite() || !obstacle.max.is_finite() {
                return Err(format!("obstacle {i} has non-finite bounds"));
            }
            if obstacle.min.x > obstacle.max.x || obstacle.min.y > obstacle.max.y {
                return Err(format!("obstacle {i} has min greater than max"));
            }
        }
        self.torpedo
            .validate()
            .map_err(|e| format!("Invalid torpedo config: {e}"))
    }

    /// Seconds per frame.
    pub fn dt(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    /// Parse and validate a JSON scenario.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: ScenarioConfig =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse scenario: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON scenario from disk.
    pub fn load(path: &Path) -> Result<Self, String> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scenario {}: {e}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize scenario: {e}"))
    }
}
