//! Guidance constants and designer defaults.

use crate::types::Color;

/// TTL at or below which the projectile is considered expired (seconds).
pub const EXPIRY_EPSILON: f32 = 0.001;

/// Squared distance to the locked target point that counts as an impact.
pub const IMPACT_DISTANCE_SQ: f32 = 0.002;

/// TTL granted after a target impact so the hit stays visible (seconds).
pub const IMPACT_GRACE_TTL: f32 = 0.5;

/// TTL granted when the reflection budget is exhausted (seconds).
pub const EXHAUSTED_TTL: f32 = 0.1;

/// Length of the forward probe ray used for reflective contacts (world units).
pub const REFLECTION_PROBE_DISTANCE: f32 = 0.5;

/// Sprite tint written while fading out; only alpha varies.
pub const FADE_TINT: Color = Color::WHITE;

// --- Viewport boundary ---

/// Normalized viewport coordinate at or below which the low edge is hit.
pub const VIEWPORT_MARGIN_LOW: f32 = 0.02;

/// Normalized viewport coordinate at or above which the high edge is hit.
pub const VIEWPORT_MARGIN_HIGH: f32 = 0.98;

// --- Scene ---

/// Tag carried by every object the guidance may lock onto.
pub const TARGETABLE_TAG: &str = "Targetable";

/// Index of the attached audio source used for ricochet/impact cues.
/// Bound only when more than one source is attached.
pub const RICOCHET_SOURCE_INDEX: usize = 1;

// --- Designer defaults ---

pub const DEFAULT_VELOCITY: f32 = 10.0;
pub const DEFAULT_TIME_TO_LIVE: f32 = 6.0;
pub const DEFAULT_FADE_TIME: f32 = 0.5;
pub const DEFAULT_NUMBER_REFLECTIONS: u32 = 2;
