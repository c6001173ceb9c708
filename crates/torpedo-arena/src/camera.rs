//! Orthographic camera used for viewport projection.

use glam::{Vec2, Vec3};

use torpedo_guidance::services::ViewportProjection;

/// Axis-aligned orthographic view looking down -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    pub center: Vec2,
    /// Half the visible width/height in world units.
    pub half_extents: Vec2,
    /// Camera z; viewport depth is measured from here.
    pub z: f32,
}

impl OrthoCamera {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
            z: -10.0,
        }
    }
}

impl ViewportProjection for OrthoCamera {
    fn world_to_viewport(&self, world: Vec3) -> Vec3 {
        let min = self.center - self.half_extents;
        let size = self.half_extents * 2.0;
        let uv = (world.truncate() - min) / size;
        Vec3::new(uv.x, uv.y, world.z - self.z)
    }
}
