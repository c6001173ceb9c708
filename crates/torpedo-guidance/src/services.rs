//! Capabilities the guidance component consumes from its host engine.
//!
//! Each trait is a narrow query or command surface so the guidance logic
//! can run against a real engine, the headless arena, or test doubles.

use glam::{Vec2, Vec3};

use torpedo_core::types::{Color, LayerMask, RaycastHit};

/// Ray queries against the collision world.
pub trait SpatialQuery {
    /// Cast a ray of at most `max_distance` from `origin` along `direction`,
    /// considering only colliders on `layers`. Returns the nearest hit.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RaycastHit>;
}

/// An object the guidance can lock onto.
pub trait Targetable {
    /// Intersection point of the ray `origin + t * direction` (t >= 0) with
    /// this target's hit geometry, if any.
    fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<Vec3>;
}

/// Tag lookup over the current scene.
pub trait SceneQuery {
    type Target: Targetable;

    /// All objects currently carrying `tag`, in scene order.
    fn find_with_tag(&self, tag: &str) -> Vec<Self::Target>;
}

/// World-to-viewport projection of the active camera.
pub trait ViewportProjection {
    /// Normalized viewport coordinates: x/y in 0..1 across the visible area,
    /// z is the depth from the camera.
    fn world_to_viewport(&self, world: Vec3) -> Vec3;
}

/// Settable tint/opacity of the projectile's sprite.
pub trait SpriteRenderer {
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);
}

/// Fire-and-forget sound playback.
pub trait AudioCue {
    fn play(&mut self);
}

/// Removes the projectile instance from the world.
pub trait DestroyHook {
    fn destroy(&mut self);
}

/// Everything one frame of guidance needs from the host.
pub struct FrameContext<'a> {
    /// Seconds since the previous frame.
    pub delta_time: f32,
    /// The projectile's world position, owned by the host transform.
    pub position: &'a mut Vec3,
    pub physics: &'a dyn SpatialQuery,
    /// `None` when no primary camera exists this frame.
    pub camera: Option<&'a dyn ViewportProjection>,
    pub sprite: &'a mut dyn SpriteRenderer,
    pub destroy: &'a mut dyn DestroyHook,
}
