//! Fundamental value types exchanged with the host engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color, each channel in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Bit mask over collision layers 0..32.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask containing exactly the given layers. Layers >= 32 are ignored.
    pub fn from_layers(layers: &[u8]) -> Self {
        let bits = layers
            .iter()
            .filter(|&&l| l < 32)
            .fold(0u32, |acc, &l| acc | (1 << l));
        LayerMask(bits)
    }

    pub fn contains(&self, layer: u8) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Opaque handle to the collider a ray hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColliderId(pub u64);

/// Result of a successful spatial query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaycastHit {
    /// World-space contact point.
    pub point: Vec2,
    /// Unit surface normal at the contact point.
    pub normal: Vec2,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
    pub collider: ColliderId,
}
