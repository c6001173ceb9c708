//! Tests for the arena services, world setup and the frame driver.

use glam::{Vec2, Vec3};
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use torpedo_core::constants::{EXHAUSTED_TTL, TARGETABLE_TAG};
use torpedo_core::enums::{BoundaryEdge, GuidanceState, ImpactCause, ReflectionSource};
use torpedo_core::events::GuidanceEvent;
use torpedo_core::types::{ColliderId, LayerMask};
use torpedo_guidance::services::{SceneQuery, SpatialQuery, Targetable, ViewportProjection};

use crate::camera::OrthoCamera;
use crate::components::{Obstacle, Tag, Torpedo, Transform};
use crate::engine::ArenaEngine;
use crate::physics::{ray_vs_box, ArenaPhysics};
use crate::scenario::{ObstacleSpec, ScenarioConfig, REFLECTIVE_LAYER};
use crate::targets::{ArenaScene, CircleTarget};
use crate::world_setup::{self, SCENERY_TAG};

fn block(min: (f32, f32), max: (f32, f32), layer: u8) -> Obstacle {
    Obstacle {
        min: Vec2::new(min.0, min.1),
        max: Vec2::new(max.0, max.1),
        layer,
    }
}

fn reflective() -> LayerMask {
    LayerMask::from_layers(&[REFLECTIVE_LAYER])
}

/// Empty arena without random content.
fn bare_scenario() -> ScenarioConfig {
    let mut config = ScenarioConfig {
        obstacles: Vec::new(),
        random_targets: 0,
        scenery_count: 0,
        launch_position: Vec3::ZERO,
        ..Default::default()
    };
    config.torpedo.direction = Vec3::X;
    config
}

// ---- Physics ----

#[test]
fn test_ray_hits_box_face_with_outward_normal() {
    let physics = ArenaPhysics::from_obstacles([(ColliderId(1), block((2.0, -1.0), (3.0, 1.0), 8))]);

    let hit = physics
        .raycast(Vec2::new(1.75, 0.0), Vec2::X, 0.5, reflective())
        .expect("should hit the left face");
    assert!((hit.distance - 0.25).abs() < 1e-6);
    assert_eq!(hit.normal, Vec2::NEG_X);
    assert_eq!(hit.collider, ColliderId(1));
    assert!((hit.point - Vec2::new(2.0, 0.0)).length() < 1e-6);

    let hit = physics
        .raycast(Vec2::new(2.5, 1.3), Vec2::new(0.0, -2.0), 0.5, reflective())
        .expect("should hit the top face");
    assert_eq!(hit.normal, Vec2::Y);
}

#[test]
fn test_ray_respects_max_distance_and_layers() {
    let physics = ArenaPhysics::from_obstacles([(ColliderId(1), block((2.0, -1.0), (3.0, 1.0), 8))]);

    assert!(physics.raycast(Vec2::new(1.0, 0.0), Vec2::X, 0.5, reflective()).is_none());
    assert!(physics
        .raycast(Vec2::new(1.75, 0.0), Vec2::X, 0.5, LayerMask::from_layers(&[3]))
        .is_none());
    assert!(physics.raycast(Vec2::new(1.75, 0.0), Vec2::NEG_X, 0.5, reflective()).is_none());
    assert!(physics.raycast(Vec2::new(1.75, 0.0), Vec2::ZERO, 0.5, reflective()).is_none());
}

#[test]
fn test_ray_returns_nearest_collider() {
    let physics = ArenaPhysics::from_obstacles([
        (ColliderId(1), block((1.4, -1.0), (2.0, 1.0), 8)),
        (ColliderId(2), block((1.2, -1.0), (1.3, 1.0), 8)),
    ]);

    let hit = physics
        .raycast(Vec2::new(1.0, 0.0), Vec2::X, 0.5, reflective())
        .unwrap();
    assert_eq!(hit.collider, ColliderId(2));
}

#[test]
fn test_ray_starting_inside_box() {
    let (distance, normal) =
        ray_vs_box(Vec2::ZERO, Vec2::Y, Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0)).unwrap();
    assert_eq!(distance, 0.0);
    assert_eq!(normal, Vec2::NEG_Y);
}

#[test]
fn test_physics_from_world_collects_obstacles() {
    let mut world = World::new();
    world.spawn((block((0.0, 0.0), (1.0, 1.0), 8),));
    world.spawn((block((5.0, 0.0), (6.0, 1.0), 2),));
    world.spawn((Tag("Scenery".to_string()),));

    let physics = ArenaPhysics::from_world(&world);
    assert_eq!(physics.len(), 2);
}

// ---- Camera ----

#[test]
fn test_camera_maps_view_to_unit_square() {
    let camera = OrthoCamera::new(Vec2::new(1.0, 1.0), Vec2::new(4.0, 2.0));

    let center = camera.world_to_viewport(Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(center.truncate(), Vec2::new(0.5, 0.5));
    assert_eq!(center.z, 10.0);

    let corner = camera.world_to_viewport(Vec3::new(-3.0, -1.0, 0.0));
    assert_eq!(corner.truncate(), Vec2::ZERO);

    let outside = camera.world_to_viewport(Vec3::new(9.0, 5.0, 0.0));
    assert_eq!(outside.truncate(), Vec2::new(1.5, 1.5));
}

// ---- Targets ----

#[test]
fn test_circle_target_entry_point() {
    let target = CircleTarget {
        center: Vec2::new(2.0, 0.0),
        radius: 0.5,
    };
    let hit = target.intersect(Vec3::new(0.0, 0.0, 0.0), Vec3::X).unwrap();
    assert_eq!(hit, Vec3::new(1.5, 0.0, 0.0));
}

#[test]
fn test_circle_target_misses() {
    let target = CircleTarget {
        center: Vec2::new(2.0, 0.0),
        radius: 0.5,
    };
    // Passes above.
    assert!(target.intersect(Vec3::new(0.0, 1.0, 0.0), Vec3::X).is_none());
    // Behind the ray.
    assert!(target.intersect(Vec3::ZERO, Vec3::NEG_X).is_none());
    // No heading.
    assert!(target.intersect(Vec3::ZERO, Vec3::ZERO).is_none());
}

#[test]
fn test_circle_target_origin_inside() {
    let target = CircleTarget {
        center: Vec2::ZERO,
        radius: 1.0,
    };
    let origin = Vec3::new(0.2, 0.1, 0.0);
    assert_eq!(target.intersect(origin, Vec3::Y), Some(origin));
}

#[test]
fn test_scene_query_filters_by_tag() {
    let mut world = World::new();
    world_setup::spawn_circle(&mut world, Vec2::new(1.0, 1.0), 0.3, TARGETABLE_TAG);
    world_setup::spawn_circle(&mut world, Vec2::new(2.0, 2.0), 0.3, SCENERY_TAG);
    world_setup::spawn_circle(&mut world, Vec2::new(3.0, 3.0), 0.3, TARGETABLE_TAG);

    let scene = ArenaScene::new(&world);
    let targets = scene.find_with_tag(TARGETABLE_TAG);
    assert_eq!(targets.len(), 2);
    assert!(targets.iter().all(|t| t.center != Vec2::new(2.0, 2.0)));
    assert!(scene.find_with_tag("Missing").is_empty());
}

// ---- World setup ----

#[test]
fn test_setup_arena_counts_and_bounds() {
    let config = ScenarioConfig {
        targets: vec![Vec2::new(0.0, 1.0)],
        random_targets: 4,
        scenery_count: 3,
        ..Default::default()
    };
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    world_setup::setup_arena(&mut world, &mut rng, &config);

    let scene = ArenaScene::new(&world);
    let targets = scene.find_with_tag(TARGETABLE_TAG);
    assert_eq!(targets.len(), 5);
    assert_eq!(scene.find_with_tag(SCENERY_TAG).len(), 3);
    assert_eq!(ArenaPhysics::from_world(&world).len(), config.obstacles.len());

    let half = config.view_half_extents;
    for t in &targets {
        assert!(t.center.x.abs() <= half.x * 0.8 + 1e-4, "target out of view: {}", t.center);
        assert!(t.center.y >= 0.0 && t.center.y <= half.y * 0.8 + 1e-4);
    }
}

#[test]
fn test_setup_arena_is_seeded() {
    let layout = |seed: u64| {
        let config = ScenarioConfig {
            seed,
            ..Default::default()
        };
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        world_setup::setup_arena(&mut world, &mut rng, &config);
        let targets = ArenaScene::new(&world).find_with_tag(TARGETABLE_TAG);
        targets
    };

    assert_eq!(layout(7), layout(7));
    assert_ne!(layout(7), layout(8));
}

// ---- Scenario config ----

#[test]
fn test_scenario_partial_json_uses_defaults() {
    let config = ScenarioConfig::from_json(
        r#"{ "seed": 9, "camera": false, "torpedo": { "velocity": 2.0 } }"#,
    )
    .unwrap();
    assert_eq!(config.seed, 9);
    assert!(!config.camera);
    assert_eq!(config.torpedo.velocity, 2.0);
    assert_eq!(config.frame_rate, 60);
    assert_eq!(config.obstacles.len(), 2);
}

#[test]
fn test_scenario_validation() {
    let bad_rate = ScenarioConfig {
        frame_rate: 0,
        ..Default::default()
    };
    assert!(bad_rate.validate().is_err());

    let mut bad_torpedo = ScenarioConfig::default();
    bad_torpedo.torpedo.time_to_live = -1.0;
    let err = bad_torpedo.validate().unwrap_err();
    assert!(err.starts_with("Invalid torpedo config"), "{err}");

    let bad_obstacle = ScenarioConfig {
        obstacles: vec![ObstacleSpec {
            min: Vec2::new(1.0, 0.0),
            max: Vec2::new(0.0, 1.0),
            layer: REFLECTIVE_LAYER,
        }],
        ..Default::default()
    };
    assert!(bad_obstacle.validate().is_err());
    assert!(ArenaEngine::new(bad_obstacle).is_err());
}

#[test]
fn test_scenario_validation_rejects_nan() {
    let nan_radius = ScenarioConfig {
        target_radius: f32::NAN,
        ..Default::default()
    };
    assert!(nan_radius.validate().is_err());

    let nan_view = ScenarioConfig {
        view_half_extents: Vec2::new(f32::NAN, 4.5),
        ..Default::default()
    };
    assert!(nan_view.validate().is_err());

    let infinite_view = ScenarioConfig {
        view_half_extents: Vec2::new(8.0, f32::INFINITY),
        ..Default::default()
    };
    assert!(infinite_view.validate().is_err());

    let nan_obstacle = ScenarioConfig {
        obstacles: vec![ObstacleSpec {
            min: Vec2::new(f32::NAN, 0.0),
            max: Vec2::new(1.0, 1.0),
            layer: REFLECTIVE_LAYER,
        }],
        ..Default::default()
    };
    assert!(nan_obstacle.validate().is_err());
}

#[test]
fn test_scenario_load_missing_file() {
    let err = ScenarioConfig::load(std::path::Path::new("/nonexistent/scenario.json")).unwrap_err();
    assert!(err.starts_with("Failed to read scenario"), "{err}");
}

#[test]
fn test_scenario_json_round_trip() {
    let config = ScenarioConfig::default();
    let json = config.to_json().unwrap();
    assert_eq!(ScenarioConfig::from_json(&json).unwrap(), config);
}

// ---- Engine ----

#[test]
fn test_launch_spawns_single_marked_torpedo() {
    let config = ScenarioConfig {
        launch_position: Vec3::new(1.0, -2.0, 0.0),
        ..bare_scenario()
    };
    let mut engine = ArenaEngine::new(config).unwrap();

    let marked: Vec<_> = engine
        .world()
        .query::<(&Torpedo, &Transform)>()
        .iter()
        .map(|(entity, (_, transform))| (entity, transform.position))
        .collect();
    assert_eq!(marked.len(), 1);
    assert_eq!(Some(marked[0].0), engine.torpedo_entity());
    assert_eq!(marked[0].1, Vec3::new(1.0, -2.0, 0.0));

    engine.run_to_completion();
    assert!(engine.is_finished());
    assert_eq!(engine.world().query::<&Torpedo>().iter().count(), 0);
}

#[test]
fn test_default_scenario_runs_to_destruction() {
    let mut engine = ArenaEngine::new(ScenarioConfig::default()).unwrap();
    let snapshots = engine.run_to_completion();

    assert!(engine.is_finished(), "torpedo still alive after {} frames", engine.frame());
    assert!(engine.torpedo_entity().is_none());

    let destroyed = snapshots
        .iter()
        .flat_map(|s| &s.events)
        .filter(|e| matches!(e, GuidanceEvent::Destroyed))
        .count();
    assert_eq!(destroyed, 1);

    let last = snapshots.last().unwrap();
    assert_eq!(last.launch_cues, 1);
    let torpedo = last.torpedo.as_ref().expect("final frame still reports the torpedo");
    assert!(torpedo.time_to_live <= 0.001);
    assert!(torpedo.reflections <= torpedo.reflection_budget);
}

#[test]
fn test_boundary_bounces_until_budget_exhausted() {
    let mut config = bare_scenario();
    config.torpedo.time_to_live = 12.0;
    let mut engine = ArenaEngine::new(config).unwrap();

    let snapshots = engine.run_to_completion();
    assert!(engine.is_finished());

    let events: Vec<&GuidanceEvent> = snapshots.iter().flat_map(|s| &s.events).collect();
    assert_eq!(events.len(), 4, "{events:?}");
    assert!(matches!(
        events[0],
        GuidanceEvent::Reflected {
            source: ReflectionSource::Boundary {
                edge: BoundaryEdge::Right
            },
            count: 1,
            ..
        }
    ));
    assert!(matches!(
        events[1],
        GuidanceEvent::Reflected {
            source: ReflectionSource::Boundary {
                edge: BoundaryEdge::Left
            },
            count: 2,
            ..
        }
    ));
    assert!(matches!(
        events[2],
        GuidanceEvent::ReflectionsExhausted {
            source: ReflectionSource::Boundary {
                edge: BoundaryEdge::Right
            }
        }
    ));
    assert!(matches!(events[3], GuidanceEvent::Destroyed));

    let last = snapshots.last().unwrap();
    assert_eq!(last.ricochet_cues, 2);
    let torpedo = last.torpedo.as_ref().unwrap();
    assert_eq!(
        torpedo.state,
        GuidanceState::Impacted {
            cause: ImpactCause::ReflectionsExhausted { target_point: None }
        }
    );
    assert_eq!(torpedo.reflections, 2);
}

#[test]
fn test_exhausted_torpedo_stops_in_place() {
    let mut config = bare_scenario();
    config.torpedo.number_reflections = 0;
    let mut engine = ArenaEngine::new(config).unwrap();

    let snapshots = engine.run_to_completion();
    let impact = snapshots
        .iter()
        .position(|s| s.torpedo.as_ref().is_some_and(|t| t.state.is_impacted()))
        .unwrap();

    let at_impact = snapshots[impact].torpedo.as_ref().unwrap();
    assert_eq!(at_impact.time_to_live, EXHAUSTED_TTL);
    for later in &snapshots[impact..] {
        if let Some(t) = &later.torpedo {
            assert_eq!(t.position, at_impact.position);
        }
    }
    assert_eq!(snapshots.last().unwrap().ricochet_cues, 0);
}

#[test]
fn test_obstacle_reflection_in_engine() {
    let mut config = bare_scenario();
    config.camera = false;
    config.torpedo.time_to_live = 1.0;
    config.obstacles = vec![ObstacleSpec {
        min: Vec2::new(2.0, -1.0),
        max: Vec2::new(2.5, 1.0),
        layer: REFLECTIVE_LAYER,
    }];
    let mut engine = ArenaEngine::new(config).unwrap();

    let snapshots = engine.run_to_completion();
    let reflected = snapshots
        .iter()
        .flat_map(|s| &s.events)
        .find_map(|e| match e {
            GuidanceEvent::Reflected {
                source, direction, ..
            } => Some((*source, *direction)),
            _ => None,
        })
        .expect("torpedo should bounce off the obstacle");

    assert!(matches!(reflected.0, ReflectionSource::Collider { .. }));
    assert!((reflected.1 - Vec3::NEG_X).length() < 1e-5);
    assert!(engine.is_finished());
}

#[test]
fn test_target_lock_and_impact_in_engine() {
    let mut config = bare_scenario();
    config.camera = false;
    config.frame_rate = 8;
    config.targets = vec![Vec2::new(2.0, 0.0)];
    config.target_radius = 0.5;
    let mut engine = ArenaEngine::new(config).unwrap();

    let first = engine.tick();
    assert_eq!(
        first.events,
        vec![GuidanceEvent::TargetAcquired {
            point: Vec3::new(1.5, 0.0, 0.0)
        }]
    );

    let snapshots = engine.run_to_completion();
    let impact_frame = snapshots
        .iter()
        .find(|s| {
            s.events
                .iter()
                .any(|e| matches!(e, GuidanceEvent::TargetImpacted { .. }))
        })
        .map(|s| s.frame)
        .unwrap();
    assert_eq!(impact_frame, 4);

    let last = snapshots.last().unwrap();
    assert_eq!(last.frame, 8, "0.5s grace at 8 fps");
    assert_eq!(last.ricochet_cues, 1);
    assert_eq!(last.torpedo.as_ref().unwrap().position, Vec3::new(1.5, 0.0, 0.0));
}

#[test]
fn test_scenery_is_never_targeted() {
    let mut config = bare_scenario();
    config.camera = false;
    config.scenery_count = 12;
    config.torpedo.direction = Vec3::Y;
    config.torpedo.time_to_live = 0.5;
    let mut engine = ArenaEngine::new(config).unwrap();
    assert!(engine.guidance().unwrap().potential_targets().is_empty());

    let snapshots = engine.run_to_completion();
    assert!(snapshots
        .iter()
        .flat_map(|s| &s.events)
        .all(|e| !matches!(e, GuidanceEvent::TargetAcquired { .. })));
}

#[test]
fn test_frame_cap_stops_run() {
    let mut config = bare_scenario();
    config.camera = false;
    config.max_frames = 10;
    let mut engine = ArenaEngine::new(config).unwrap();

    let snapshots = engine.run_to_completion();
    assert_eq!(snapshots.len(), 10);
    assert!(!engine.is_finished());
    assert!(engine.guidance().is_some());
}
