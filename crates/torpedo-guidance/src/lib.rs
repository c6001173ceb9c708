//! Per-projectile guidance for torpedoes.
//!
//! `ProjectileGuidance` owns one torpedo's heading, lifetime and bounce
//! budget and advances them once per frame. Everything engine-specific
//! (raycasts, viewport projection, tag queries, sprites, audio,
//! destruction) is reached through the capability traits in [`services`].

pub mod guidance;
pub mod reflection;
pub mod services;

pub use guidance::ProjectileGuidance;
pub use services::FrameContext;
pub use torpedo_core as core;
