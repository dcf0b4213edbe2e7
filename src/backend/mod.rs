//! Physics backends and the command application stage.

mod noop;
mod traits;

pub use noop::{NoOpBackendPlugin, NoopBackend, NoopVelocity};
pub use traits::CharacterPhysicsBackend;

use bevy::prelude::*;

use crate::motor::CharacterMotor;

/// Drain every motor's velocity command queue and apply it to the rigid
/// body through the backend.
///
/// Runs once per fixed tick, last in the motor chain, so the physics step
/// integrates exactly what the control systems decided. The resulting
/// velocity is mirrored back onto the motor for next tick's reads.
pub fn apply_velocity_commands<B: CharacterPhysicsBackend>(world: &mut World) {
    let dt = B::get_fixed_timestep(world);

    let mut batch = Vec::new();
    let mut q_motors = world.query::<(Entity, &mut CharacterMotor)>();
    for (entity, mut motor) in q_motors.iter_mut(world) {
        batch.push((entity, motor.take_commands()));
    }

    for (entity, commands) in batch {
        let mut velocity = B::get_velocity(world, entity);
        for command in &commands {
            velocity = command.apply(velocity, dt);
        }
        B::set_velocity(world, entity, velocity);
        if let Some(mut motor) = world.get_mut::<CharacterMotor>(entity) {
            motor.velocity = velocity;
        }
    }
}
