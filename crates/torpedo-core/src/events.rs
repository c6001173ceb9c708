//! Events emitted by the guidance component for host feedback.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::ReflectionSource;

/// Something notable that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GuidanceEvent {
    /// An intercept point was found.
    TargetAcquired { point: Vec3 },
    /// Direction changed by a bounce.
    Reflected {
        source: ReflectionSource,
        normal: Vec2,
        direction: Vec3,
        count: u32,
    },
    /// A reflective contact arrived with no bounces left.
    ReflectionsExhausted { source: ReflectionSource },
    /// The locked intercept point was reached.
    TargetImpacted { point: Vec3 },
    /// The destruction hook fired.
    Destroyed,
}
