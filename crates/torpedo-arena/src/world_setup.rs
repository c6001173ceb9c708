//! Entity spawn factories for setting up the arena world.

use glam::{Vec2, Vec3};
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use torpedo_core::constants::TARGETABLE_TAG;

use crate::components::{Obstacle, Sprite, Tag, Torpedo, Transform};
use crate::scenario::ScenarioConfig;
use crate::targets::CircleTarget;

/// Tag carried by decorative circles.
pub const SCENERY_TAG: &str = "Scenery";

/// Populate the static part of the arena: obstacles, targets and scenery.
pub fn setup_arena(world: &mut World, rng: &mut ChaCha8Rng, config: &ScenarioConfig) {
    for spec in &config.obstacles {
        world.spawn((Obstacle {
            min: spec.min,
            max: spec.max,
            layer: spec.layer,
        },));
    }

    for &center in &config.targets {
        spawn_circle(world, center, config.target_radius, TARGETABLE_TAG);
    }
    for _ in 0..config.random_targets {
        let center = scatter_point(rng, config);
        spawn_circle(world, center, config.target_radius, TARGETABLE_TAG);
    }
    for _ in 0..config.scenery_count {
        let center = scatter_point(rng, config);
        spawn_circle(world, center, config.target_radius, SCENERY_TAG);
    }
}

/// Spawn a tagged circle.
pub fn spawn_circle(world: &mut World, center: Vec2, radius: f32, tag: &str) -> hecs::Entity {
    world.spawn((Tag(tag.to_string()), CircleTarget { center, radius }))
}

/// Spawn the torpedo entity, fully opaque.
pub fn spawn_torpedo(world: &mut World, position: Vec3) -> hecs::Entity {
    world.spawn((Torpedo, Transform { position }, Sprite::default()))
}

/// Random point in the upper part of the view, kept clear of the edges.
fn scatter_point(rng: &mut ChaCha8Rng, config: &ScenarioConfig) -> Vec2 {
    let half = config.view_half_extents;
    let x = rng.gen_range(-0.8f32..0.8) * half.x;
    let y = rng.gen_range(0.2f32..0.8) * half.y;
    config.view_center + Vec2::new(x, y)
}
