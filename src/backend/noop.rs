//! Headless physics backend.
//!
//! [`NoopBackend`] stores velocities in a plain component and performs no
//! collision detection at all. It exists so the full motor state machine
//! can run (and be tested) without a physics engine; sensor samples are
//! injected by whoever drives the world.

use bevy::prelude::*;

use super::CharacterPhysicsBackend;

/// Linear velocity storage for [`NoopBackend`]-driven characters.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct NoopVelocity(pub Vec3);

/// Backend with no physics engine behind it.
pub struct NoopBackend;

impl CharacterPhysicsBackend for NoopBackend {
    fn plugin() -> impl Plugin {
        NoOpBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<NoopVelocity>(entity)
            .map(|velocity| velocity.0)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3) {
        if let Some(mut stored) = world.get_mut::<NoopVelocity>(entity) {
            stored.0 = velocity;
        }
    }

    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|time| time.delta_secs())
            .filter(|&dt| dt > 0.0)
            .unwrap_or(1.0 / 60.0)
    }
}

/// Empty plugin for backends that don't need additional setup.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<NoopVelocity>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_roundtrip() {
        let mut world = World::new();
        let entity = world.spawn(NoopVelocity::default()).id();

        assert_eq!(NoopBackend::get_velocity(&world, entity), Vec3::ZERO);

        NoopBackend::set_velocity(&mut world, entity, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            NoopBackend::get_velocity(&world, entity),
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn missing_component_reads_zero() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        assert_eq!(NoopBackend::get_velocity(&world, entity), Vec3::ZERO);
        // Writing to an entity without the component is a no-op, not a panic.
        NoopBackend::set_velocity(&mut world, entity, Vec3::ONE);
    }

    #[test]
    fn fallback_timestep_without_resource() {
        let world = World::new();
        assert!((NoopBackend::get_fixed_timestep(&world) - 1.0 / 60.0).abs() < 1e-6);
    }
}
