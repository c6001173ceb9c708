//! Headless host for torpedo guidance.
//!
//! Owns a hecs ECS world with obstacles, tagged targets and the torpedo
//! entity, supplies the guidance capability traits from it, and drives one
//! guidance update per frame. Completely headless, enabling deterministic
//! testing and replay.

pub mod audio;
pub mod camera;
pub mod components;
pub mod engine;
pub mod physics;
pub mod scenario;
pub mod targets;
pub mod world_setup;

pub use engine::{ArenaEngine, ArenaSnapshot};
pub use scenario::ScenarioConfig;
pub use torpedo_core as core;

#[cfg(test)]
mod tests;
