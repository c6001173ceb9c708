//! State and classification enums used by the guidance component.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{VIEWPORT_MARGIN_HIGH, VIEWPORT_MARGIN_LOW};
use crate::types::ColliderId;

/// Guidance lifecycle phase.
///
/// Only moves forward: `Searching -> Locked -> Impacted`, or straight to
/// `Impacted` when the reflection budget runs out before a lock. Target
/// acquisition is sticky across every transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum GuidanceState {
    /// No intercept point found yet; acquisition is retried every frame.
    #[default]
    Searching,
    /// Homing toward a fixed intercept point.
    Locked { target_point: Vec3 },
    /// Motion has stopped; only the TTL countdown and fade remain.
    Impacted { cause: ImpactCause },
}

impl GuidanceState {
    pub fn is_searching(&self) -> bool {
        matches!(self, GuidanceState::Searching)
    }

    /// True once an intercept point has ever been acquired.
    pub fn target_acquired(&self) -> bool {
        match self {
            GuidanceState::Searching => false,
            GuidanceState::Locked { .. } => true,
            GuidanceState::Impacted { cause } => cause.acquired_point().is_some(),
        }
    }

    pub fn is_impacted(&self) -> bool {
        matches!(self, GuidanceState::Impacted { .. })
    }

    /// The point being homed toward, if locked.
    pub fn target_point(&self) -> Option<Vec3> {
        match self {
            GuidanceState::Locked { target_point } => Some(*target_point),
            _ => None,
        }
    }
}

/// Why motion stopped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cause")]
pub enum ImpactCause {
    /// Reached the locked intercept point.
    Target { point: Vec3 },
    /// Touched a reflective surface with no bounces left. Keeps the lock
    /// held at that moment, if any.
    ReflectionsExhausted { target_point: Option<Vec3> },
}

impl ImpactCause {
    /// Intercept point acquired before motion stopped.
    pub fn acquired_point(&self) -> Option<Vec3> {
        match self {
            ImpactCause::Target { point } => Some(*point),
            ImpactCause::ReflectionsExhausted { target_point } => *target_point,
        }
    }
}

/// Viewport edge crossed by the projectile.
///
/// Declaration order is the evaluation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryEdge {
    Left,
    Right,
    Bottom,
    Top,
}

impl BoundaryEdge {
    /// Classify a normalized viewport position.
    ///
    /// Only the first matching edge is reported, in the order
    /// left, right, bottom, top.
    pub fn from_viewport(viewport: Vec2) -> Option<BoundaryEdge> {
        if viewport.x <= VIEWPORT_MARGIN_LOW {
            Some(BoundaryEdge::Left)
        } else if viewport.x >= VIEWPORT_MARGIN_HIGH {
            Some(BoundaryEdge::Right)
        } else if viewport.y <= VIEWPORT_MARGIN_LOW {
            Some(BoundaryEdge::Bottom)
        } else if viewport.y >= VIEWPORT_MARGIN_HIGH {
            Some(BoundaryEdge::Top)
        } else {
            None
        }
    }

    /// Inward-facing unit normal of the edge.
    pub fn normal(&self) -> Vec2 {
        match self {
            BoundaryEdge::Left => Vec2::X,
            BoundaryEdge::Right => Vec2::NEG_X,
            BoundaryEdge::Bottom => Vec2::Y,
            BoundaryEdge::Top => Vec2::NEG_Y,
        }
    }
}

/// What triggered a reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ReflectionSource {
    /// A physical collider on a reflective layer.
    Collider { id: ColliderId },
    /// Synthetic bounce off the visible play-area edge.
    Boundary { edge: BoundaryEdge },
}
