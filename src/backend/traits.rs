//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement to
//! work with the character motor. The core systems only ever talk to the
//! rigid body through it, so swapping physics engines (Avian, Rapier,
//! custom, headless) never touches the motor logic.

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// A backend provides the rigid-body velocity handle plus whatever sensor
/// systems its physics engine needs (registered by its plugin in the
/// [`Sensors`](crate::CharacterMotorSet::Sensors) set). The built-in
/// implementations are `Avian3dBackend` (behind the `avian3d` feature) and
/// [`NoopBackend`](super::NoopBackend) for headless use.
pub trait CharacterPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Get the current linear velocity of an entity.
    fn get_velocity(world: &World, entity: Entity) -> Vec3;

    /// Set the linear velocity of an entity.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3);

    /// Get the fixed timestep delta time.
    fn get_fixed_timestep(world: &World) -> f32;
}
