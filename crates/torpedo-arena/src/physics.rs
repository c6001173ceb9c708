//! Ray queries against the arena's box colliders.

use glam::Vec2;
use hecs::World;

use torpedo_core::types::{ColliderId, LayerMask, RaycastHit};
use torpedo_guidance::services::SpatialQuery;

use crate::components::Obstacle;

/// Frame-local copy of every obstacle collider.
pub struct ArenaPhysics {
    colliders: Vec<(ColliderId, Obstacle)>,
}

impl ArenaPhysics {
    /// Gather all obstacles currently in the world.
    pub fn from_world(world: &World) -> Self {
        let colliders = world
            .query::<&Obstacle>()
            .iter()
            .map(|(entity, obstacle)| (ColliderId(entity.to_bits().get()), *obstacle))
            .collect();
        Self { colliders }
    }

    pub fn from_obstacles(obstacles: impl IntoIterator<Item = (ColliderId, Obstacle)>) -> Self {
        Self {
            colliders: obstacles.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl SpatialQuery for ArenaPhysics {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RaycastHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            return None;
        }

        self.colliders
            .iter()
            .filter(|(_, obstacle)| layers.contains(obstacle.layer))
            .filter_map(|(id, obstacle)| {
                let (distance, normal) = ray_vs_box(origin, dir, obstacle.min, obstacle.max)?;
                (distance <= max_distance).then_some(RaycastHit {
                    point: origin + dir * distance,
                    normal,
                    distance,
                    collider: *id,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Slab test of a unit ray against an axis-aligned box.
///
/// Returns the entry distance and the normal of the entry face. A ray that
/// starts inside the box hits at distance 0 with the normal facing back
/// along the ray.
pub fn ray_vs_box(origin: Vec2, dir: Vec2, min: Vec2, max: Vec2) -> Option<(f32, Vec2)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec2::ZERO;

    for axis in 0..2 {
        let o = origin[axis];
        let d = dir[axis];
        let (lo, hi) = (min[axis], max[axis]);

        if d.abs() < f32::EPSILON {
            // Parallel to this slab: must already be within it.
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let t0 = (lo - o) / d;
        let t1 = (hi - o) / d;
        let (near, far) = if t0 < t1 { (t0, t1) } else { (t1, t0) };

        if near > t_enter {
            t_enter = near;
            let mut face = Vec2::ZERO;
            face[axis] = -d.signum();
            normal = face;
        }
        t_exit = t_exit.min(far);
    }

    if t_enter > t_exit || t_exit < 0.0 {
        return None;
    }
    if t_enter < 0.0 {
        return Some((0.0, -dir));
    }
    Some((t_enter, normal))
}
