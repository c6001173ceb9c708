//! ECS components for the arena world.

use glam::{Vec2, Vec3};

use torpedo_core::types::Color;
use torpedo_guidance::services::SpriteRenderer;

/// Marker for the torpedo entity.
#[derive(Debug, Clone, Copy)]
pub struct Torpedo;

/// World-space placement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
}

/// Tint and opacity of a rendered sprite.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sprite {
    pub color: Color,
}

impl SpriteRenderer for Sprite {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

/// Scene label used by tag queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag(pub String);

/// Axis-aligned box collider on a single collision layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub min: Vec2,
    pub max: Vec2,
    pub layer: u8,
}
