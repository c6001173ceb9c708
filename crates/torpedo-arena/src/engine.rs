//! Arena engine: hosts one torpedo and steps it frame by frame.
//!
//! `ArenaEngine` owns the hecs world, supplies the guidance services from
//! it each frame, applies destruction requests, and produces
//! `ArenaSnapshot`s.

use std::cell::Cell;
use std::rc::Rc;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use torpedo_core::events::GuidanceEvent;
use torpedo_core::state::TorpedoSnapshot;
use torpedo_guidance::services::{AudioCue, DestroyHook, FrameContext, ViewportProjection};
use torpedo_guidance::ProjectileGuidance;

use crate::audio::CueSource;
use crate::camera::OrthoCamera;
use crate::components::{Sprite, Torpedo, Transform};
use crate::physics::ArenaPhysics;
use crate::scenario::ScenarioConfig;
use crate::targets::{ArenaScene, CircleTarget};
use crate::world_setup;

/// Everything observable after one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub frame: u64,
    pub elapsed_secs: f32,
    /// `None` once the torpedo has been removed from the world.
    pub torpedo: Option<TorpedoSnapshot>,
    pub events: Vec<GuidanceEvent>,
    pub launch_cues: u32,
    pub ricochet_cues: u32,
}

/// The torpedo currently in flight.
struct Flight {
    entity: Entity,
    guidance: ProjectileGuidance<CircleTarget>,
}

/// Destruction hook that defers the despawn to the end of the frame.
struct Despawner<'b> {
    entity: Entity,
    buffer: &'b mut Vec<Entity>,
}

impl DestroyHook for Despawner<'_> {
    fn destroy(&mut self) {
        self.buffer.push(self.entity);
    }
}

pub struct ArenaEngine {
    world: World,
    config: ScenarioConfig,
    camera: Option<OrthoCamera>,
    frame: u64,
    elapsed_secs: f32,
    flight: Option<Flight>,
    despawn_buffer: Vec<Entity>,
    launch_cue: Rc<Cell<u32>>,
    ricochet_cue: Rc<Cell<u32>>,
}

impl ArenaEngine {
    /// Build the arena and launch the torpedo.
    pub fn new(config: ScenarioConfig) -> Result<Self, String> {
        config.validate()?;

        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        world_setup::setup_arena(&mut world, &mut rng, &config);

        let camera = config
            .camera
            .then(|| OrthoCamera::new(config.view_center, config.view_half_extents));

        let entity = world_setup::spawn_torpedo(&mut world, config.launch_position);

        let mut launch = CueSource::new("launch");
        let ricochet = CueSource::new("ricochet");
        let launch_cue = launch.counter();
        let ricochet_cue = ricochet.counter();
        launch.play();

        let mut guidance = ProjectileGuidance::new(config.torpedo.clone());
        let sources: Vec<Box<dyn AudioCue>> = vec![Box::new(launch), Box::new(ricochet)];
        guidance.start(&ArenaScene::new(&world), sources);

        info!(
            seed = config.seed,
            targets = guidance.potential_targets().len(),
            position = ?config.launch_position,
            "torpedo launched"
        );

        Ok(Self {
            world,
            config,
            camera,
            frame: 0,
            elapsed_secs: 0.0,
            flight: Some(Flight { entity, guidance }),
            despawn_buffer: Vec::new(),
            launch_cue,
            ricochet_cue,
        })
    }

    /// Advance one frame and return the resulting snapshot.
    pub fn tick(&mut self) -> ArenaSnapshot {
        let dt = self.config.dt();
        let mut events = Vec::new();
        let mut torpedo = None;

        if let Some(flight) = self.flight.as_mut() {
            let physics = ArenaPhysics::from_world(&self.world);
            let camera = self.camera;
            let mut despawn = Despawner {
                entity: flight.entity,
                buffer: &mut self.despawn_buffer,
            };

            match self
                .world
                .query_one_mut::<(&Torpedo, &mut Transform, &mut Sprite)>(flight.entity)
            {
                Ok((_, transform, sprite)) => {
                    let mut frame = FrameContext {
                        delta_time: dt,
                        position: &mut transform.position,
                        physics: &physics,
                        camera: camera.as_ref().map(|c| c as &dyn ViewportProjection),
                        sprite: &mut *sprite,
                        destroy: &mut despawn,
                    };
                    flight.guidance.tick(&mut frame);
                    torpedo = Some(flight.guidance.snapshot(transform.position, sprite.color.a));
                }
                Err(_) => {
                    warn!(entity = ?flight.entity, "torpedo entity missing; dropping guidance");
                    self.despawn_buffer.push(flight.entity);
                }
            }

            events = flight.guidance.drain_events();
        }

        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
            if self.flight.as_ref().is_some_and(|f| f.entity == entity) {
                self.flight = None;
                info!(frame = self.frame + 1, "torpedo removed");
            }
        }

        self.frame += 1;
        self.elapsed_secs += dt;

        ArenaSnapshot {
            frame: self.frame,
            elapsed_secs: self.elapsed_secs,
            torpedo,
            events,
            launch_cues: self.launch_cue.get(),
            ricochet_cues: self.ricochet_cue.get(),
        }
    }

    /// Tick until the torpedo is gone or the frame cap is hit.
    pub fn run_to_completion(&mut self) -> Vec<ArenaSnapshot> {
        let mut snapshots = Vec::new();
        while !self.is_finished() && self.frame < self.config.max_frames as u64 {
            snapshots.push(self.tick());
        }
        snapshots
    }

    /// True once the torpedo has been destroyed.
    pub fn is_finished(&self) -> bool {
        self.flight.is_none()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn camera(&self) -> Option<OrthoCamera> {
        self.camera
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn torpedo_entity(&self) -> Option<Entity> {
        self.flight.as_ref().map(|f| f.entity)
    }

    pub fn guidance(&self) -> Option<&ProjectileGuidance<CircleTarget>> {
        self.flight.as_ref().map(|f| &f.guidance)
    }
}
