//! Targetable geometry and the tag query over the arena world.

use glam::{Vec2, Vec3};
use hecs::World;

use torpedo_guidance::services::{SceneQuery, Targetable};

use crate::components::Tag;

/// Circular hit area in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleTarget {
    pub center: Vec2,
    pub radius: f32,
}

impl Targetable for CircleTarget {
    /// Entry point of the ray into the circle, at the ray origin's depth.
    /// An origin already inside the circle is its own intersection.
    fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<Vec3> {
        let o = origin.truncate();
        let d = direction.truncate();
        let m = o - self.center;
        let r_sq = self.radius * self.radius;

        if m.length_squared() <= r_sq {
            return Some(origin);
        }

        let a = d.length_squared();
        if a <= f32::EPSILON {
            return None;
        }
        let b = m.dot(d);
        let c = m.length_squared() - r_sq;
        let disc = b * b - a * c;
        if disc < 0.0 {
            return None;
        }

        let t = (-b - disc.sqrt()) / a;
        if t < 0.0 {
            return None;
        }
        let hit = o + d * t;
        Some(hit.extend(origin.z))
    }
}

/// Tag lookup over every tagged circle in the world.
pub struct ArenaScene<'w> {
    world: &'w World,
}

impl<'w> ArenaScene<'w> {
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }
}

impl SceneQuery for ArenaScene<'_> {
    type Target = CircleTarget;

    fn find_with_tag(&self, tag: &str) -> Vec<CircleTarget> {
        self.world
            .query::<(&Tag, &CircleTarget)>()
            .iter()
            .filter(|(_, (t, _))| t.0 == tag)
            .map(|(_, (_, target))| *target)
            .collect()
    }
}
