//! Serializable view of a projectile, produced every frame for UI/replay.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::GuidanceState;

/// Point-in-time view of a single torpedo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorpedoSnapshot {
    pub position: Vec3,
    pub direction: Vec3,
    pub time_to_live: f32,
    /// Sprite opacity (0 = invisible).
    pub opacity: f32,
    pub reflections: u32,
    pub reflection_budget: u32,
    pub state: GuidanceState,
}
