//! Torpedo guidance: target acquisition, straight-line homing, reflective
//! bounces with a budget, and a time-to-live countdown with fade-out.
//!
//! One `ProjectileGuidance` governs exactly one projectile. The host calls
//! [`ProjectileGuidance::start`] once after spawning and
//! [`ProjectileGuidance::tick`] once per rendered frame.

use glam::{Vec2, Vec3};
use tracing::{debug, trace};

use torpedo_core::config::TorpedoConfig;
use torpedo_core::constants::*;
use torpedo_core::enums::{BoundaryEdge, GuidanceState, ImpactCause, ReflectionSource};
use torpedo_core::events::GuidanceEvent;
use torpedo_core::state::TorpedoSnapshot;

use crate::reflection::reflect;
use crate::services::{AudioCue, FrameContext, SceneQuery, Targetable};

/// Guidance state for a single torpedo.
pub struct ProjectileGuidance<T> {
    config: TorpedoConfig,
    direction: Vec3,
    time_to_live: f32,
    current_reflections: u32,
    state: GuidanceState,
    /// Snapshot of candidate targets taken once by `start`.
    potential_targets: Vec<T>,
    ricochet: Option<Box<dyn AudioCue>>,
    destroyed: bool,
    events: Vec<GuidanceEvent>,
}

impl<T: Targetable> ProjectileGuidance<T> {
    pub fn new(config: TorpedoConfig) -> Self {
        Self {
            direction: config.direction,
            time_to_live: config.time_to_live,
            config,
            current_reflections: 0,
            state: GuidanceState::Searching,
            potential_targets: Vec::new(),
            ricochet: None,
            destroyed: false,
            events: Vec::new(),
        }
    }

    /// Capture the candidate targets and bind the ricochet cue.
    ///
    /// The cue is the second attached audio source; with fewer than two
    /// sources no cue is played.
    pub fn start<S>(&mut self, scene: &S, audio_sources: Vec<Box<dyn AudioCue>>)
    where
        S: SceneQuery<Target = T>,
    {
        self.potential_targets = scene.find_with_tag(TARGETABLE_TAG);
        self.ricochet = audio_sources.into_iter().nth(RICOCHET_SOURCE_INDEX);
        debug!(
            targets = self.potential_targets.len(),
            ricochet_bound = self.ricochet.is_some(),
            "guidance started"
        );
    }

    /// Advance one frame.
    pub fn tick(&mut self, frame: &mut FrameContext<'_>) {
        if self.destroyed {
            return;
        }

        let dt = frame.delta_time;
        self.time_to_live -= dt;

        if !self.state.is_impacted() && self.time_to_live > EXPIRY_EPSILON {
            if self.state.is_searching() {
                if let Some(point) = self.acquire_target(*frame.position) {
                    debug!(?point, "target acquired");
                    self.state = GuidanceState::Locked {
                        target_point: point,
                    };
                    self.events.push(GuidanceEvent::TargetAcquired { point });
                }
            }

            self.check_reflections(frame);

            // A bounce with no budget left stops motion this very frame.
            if !self.state.is_impacted() {
                match self.state.target_point() {
                    Some(point) if (*frame.position - point).length_squared() <= IMPACT_DISTANCE_SQ => {
                        self.impact_target(point);
                    }
                    _ => {
                        *frame.position += self.direction * self.config.velocity * dt;
                    }
                }
            }
        }

        if self.time_to_live <= self.config.fade_time {
            self.fade(frame, dt);

            if self.time_to_live <= EXPIRY_EPSILON {
                debug!(ttl = self.time_to_live, "torpedo expired");
                self.destroyed = true;
                frame.destroy.destroy();
                self.events.push(GuidanceEvent::Destroyed);
            }
        }
    }

    /// First candidate, in snapshot order, whose hit geometry the current
    /// ray intersects. Not the nearest one.
    pub fn acquire_target(&self, position: Vec3) -> Option<Vec3> {
        self.potential_targets
            .iter()
            .find_map(|target| target.intersect(position, self.direction))
    }

    /// Probe ahead for reflective colliders, falling back to the viewport
    /// boundary when nothing is hit.
    pub fn check_reflections(&mut self, frame: &FrameContext<'_>) {
        let hit = frame.physics.raycast(
            frame.position.truncate(),
            self.direction.truncate(),
            REFLECTION_PROBE_DISTANCE,
            self.config.reflective_layers,
        );

        match hit {
            Some(hit) => self.reflect(hit.normal, ReflectionSource::Collider { id: hit.collider }),
            None => self.check_viewport_bounds(frame),
        }
    }

    /// Synthesize a bounce when the projectile enters the edge margin of
    /// the viewport. Skipped when there is no camera.
    pub fn check_viewport_bounds(&mut self, frame: &FrameContext<'_>) {
        let Some(camera) = frame.camera else {
            return;
        };

        let viewport = camera.world_to_viewport(*frame.position);
        if let Some(edge) = BoundaryEdge::from_viewport(viewport.truncate()) {
            self.reflect(edge.normal(), ReflectionSource::Boundary { edge });
        }
    }

    /// Bounce about `normal`, or force an impact if the budget is spent.
    pub fn reflect(&mut self, normal: Vec2, source: ReflectionSource) {
        if self.current_reflections >= self.config.number_reflections {
            debug!(?source, budget = self.config.number_reflections, "reflection budget exhausted");
            self.state = GuidanceState::Impacted {
                cause: ImpactCause::ReflectionsExhausted {
                    target_point: self.state.target_point(),
                },
            };
            self.time_to_live = EXHAUSTED_TTL;
            self.events.push(GuidanceEvent::ReflectionsExhausted { source });
            return;
        }

        self.current_reflections += 1;

        let reflected = reflect(self.direction.truncate(), normal);
        self.direction = reflected.extend(0.0);
        trace!(?source, ?normal, direction = ?self.direction, count = self.current_reflections, "reflected");

        self.play_ricochet();
        self.events.push(GuidanceEvent::Reflected {
            source,
            normal,
            direction: self.direction,
            count: self.current_reflections,
        });
    }

    fn impact_target(&mut self, point: Vec3) {
        debug!(?point, "target impacted");
        self.state = GuidanceState::Impacted {
            cause: ImpactCause::Target { point },
        };
        self.play_ricochet();
        self.time_to_live = IMPACT_GRACE_TTL;
        self.events.push(GuidanceEvent::TargetImpacted { point });
    }

    /// Linear opacity ramp at `1 / fade_time` per second.
    fn fade(&self, frame: &mut FrameContext<'_>, dt: f32) {
        let current = frame.sprite.color().a;
        let alpha = if self.config.fade_time > 0.0 {
            current - dt / self.config.fade_time
        } else {
            0.0
        };
        frame.sprite.set_color(FADE_TINT.with_alpha(alpha.max(0.0)));
    }

    fn play_ricochet(&mut self) {
        if let Some(cue) = self.ricochet.as_mut() {
            cue.play();
        }
    }
}

impl<T> ProjectileGuidance<T> {
    pub fn config(&self) -> &TorpedoConfig {
        &self.config
    }

    pub fn state(&self) -> GuidanceState {
        self.state
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn time_to_live(&self) -> f32 {
        self.time_to_live
    }

    pub fn current_reflections(&self) -> u32 {
        self.current_reflections
    }

    pub fn potential_targets(&self) -> &[T] {
        &self.potential_targets
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GuidanceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self, position: Vec3, opacity: f32) -> TorpedoSnapshot {
        TorpedoSnapshot {
            position,
            direction: self.direction,
            time_to_live: self.time_to_live,
            opacity,
            reflections: self.current_reflections,
            reflection_budget: self.config.number_reflections,
            state: self.state,
        }
    }
}
