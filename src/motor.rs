//! The character motor component and its velocity command queue.
//!
//! [`CharacterMotor`] carries all per-tick runtime state: the latest sensor
//! samples, the resolved input channels, timers, and the queue of
//! [`VelocityCommand`]s the control systems emit. The backend drains the
//! queue once per tick and applies it to the rigid body, so the core systems
//! never touch a physics engine type.

use bevy::prelude::*;

use crate::animation::AnimatorParams;
use crate::detection::{GroundSample, StepSample};
use crate::intent::MovementIntent;
use crate::state::MotionState;

/// A single velocity mutation, applied in queue order against the rigid
/// body's current velocity.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum VelocityCommand {
    /// Blend the velocity toward `target` (with the current vertical
    /// component preserved) by `rate × dt`, clamped to a full step.
    BlendPlanar { target: Vec3, rate: f32 },
    /// Overwrite the planar velocity, preserving the vertical component.
    SetPlanar { target: Vec3 },
    /// Overwrite the vertical velocity component.
    SetVertical { speed: f32 },
    /// Overwrite the full velocity.
    Set { target: Vec3 },
    /// Instantaneous velocity change.
    Impulse { delta: Vec3 },
}

impl VelocityCommand {
    /// Apply this command to a velocity.
    pub fn apply(&self, velocity: Vec3, dt: f32) -> Vec3 {
        match *self {
            Self::BlendPlanar { target, rate } => {
                let mut target = target;
                target.y = velocity.y;
                velocity.lerp(target, (rate * dt).clamp(0.0, 1.0))
            }
            Self::SetPlanar { target } => Vec3::new(target.x, velocity.y, target.z),
            Self::SetVertical { speed } => Vec3::new(velocity.x, speed, velocity.z),
            Self::Set { target } => target,
            Self::Impulse { delta } => velocity + delta,
        }
    }
}

/// Runtime state of one character motor.
///
/// Insert this (plus a [`MotorConfig`](crate::config::MotorConfig)) on an
/// entity with the backend's rigid-body components to drive it.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
#[require(Transform, MovementIntent, MotionState, AnimatorParams)]
pub struct CharacterMotor {
    /// Latest ground probe result. Written by the sensor stage.
    pub ground: GroundSample,
    /// Surface angle (radians) from the independent slope cross-check ray,
    /// if it hit.
    pub slope_cross_angle: Option<f32>,
    /// Steppable ledge ahead of the movement direction, if any.
    pub step: Option<StepSample>,
    /// Whether there is headroom to stand up from a crouch.
    pub headroom_clear: bool,
    /// Whether the space ahead of the capsule is clear (gates air control).
    pub forward_clear: bool,

    /// Forward input channel after mode and sprint shaping.
    pub speed: f32,
    /// Lateral input channel after mode and sprint shaping.
    pub direction: f32,
    /// Normalized move amount for this tick.
    pub move_amount: f32,
    /// World-space direction the character wants to travel.
    pub target_direction: Vec3,

    /// Rigid-body velocity as of the last backend application.
    pub velocity: Vec3,
    /// Vertical velocity captured while airborne (for animation).
    pub vertical_velocity: f32,
    /// Speed scalar most recently selected from the speed table.
    pub speed_scale: f32,

    /// Countdown for an active jump; removed when it reaches zero.
    pub jump_timer: Option<f32>,
    /// Smoothed crouch amount in `[0, 1]`.
    pub crouch_fraction: f32,
    /// Standing capsule height, captured by the backend before the first
    /// crouch resize. Zero until then.
    pub standing_height: f32,

    /// While set, all control systems skip this character; sensors and
    /// ground handling keep running.
    pub lock_movement: bool,

    commands: Vec<VelocityCommand>,
}

impl Default for CharacterMotor {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterMotor {
    /// Create a motor with idle state.
    pub fn new() -> Self {
        Self {
            ground: GroundSample::miss(),
            slope_cross_angle: None,
            step: None,
            headroom_clear: true,
            forward_clear: true,
            speed: 0.0,
            direction: 0.0,
            move_amount: 0.0,
            target_direction: Vec3::ZERO,
            velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            speed_scale: 0.0,
            jump_timer: None,
            crouch_fraction: 0.0,
            standing_height: 0.0,
            lock_movement: false,
            commands: Vec::new(),
        }
    }

    /// Queue a velocity command for the backend to apply this tick.
    pub fn push_command(&mut self, command: VelocityCommand) {
        self.commands.push(command);
    }

    /// Drain the queued commands. Called by the backend once per tick.
    pub fn take_commands(&mut self) -> Vec<VelocityCommand> {
        core::mem::take(&mut self.commands)
    }

    /// Queued commands, for inspection.
    pub fn pending_commands(&self) -> &[VelocityCommand] {
        &self.commands
    }

    /// Planar (horizontal) speed of the mirrored rigid-body velocity.
    pub fn planar_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }

    /// Whether the step probe found a steppable ledge this tick.
    pub fn is_stepping(&self) -> bool {
        self.step.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_planar_preserves_vertical() {
        let cmd = VelocityCommand::BlendPlanar {
            target: Vec3::new(10.0, 99.0, 0.0),
            rate: 20.0,
        };
        // dt = 0.05 → full step (t = 1.0).
        let out = cmd.apply(Vec3::new(0.0, -3.0, 0.0), 0.05);
        assert!((out.x - 10.0).abs() < 1e-5);
        assert!((out.y + 3.0).abs() < 1e-5);

        // Smaller dt blends partially.
        let out = cmd.apply(Vec3::new(0.0, -3.0, 0.0), 0.01);
        assert!((out.x - 2.0).abs() < 1e-5);
        assert!((out.y + 3.0).abs() < 1e-5);
    }

    #[test]
    fn set_planar_preserves_vertical() {
        let cmd = VelocityCommand::SetPlanar {
            target: Vec3::new(1.0, 50.0, 2.0),
        };
        let out = cmd.apply(Vec3::new(9.0, -4.0, 9.0), 1.0 / 60.0);
        assert_eq!(out, Vec3::new(1.0, -4.0, 2.0));
    }

    #[test]
    fn set_vertical_preserves_planar() {
        let cmd = VelocityCommand::SetVertical { speed: 4.0 };
        let out = cmd.apply(Vec3::new(1.0, -9.0, 2.0), 1.0 / 60.0);
        assert_eq!(out, Vec3::new(1.0, 4.0, 2.0));
    }

    #[test]
    fn impulse_adds() {
        let cmd = VelocityCommand::Impulse {
            delta: Vec3::new(0.0, -0.5, 0.0),
        };
        let out = cmd.apply(Vec3::new(1.0, 1.0, 1.0), 1.0 / 60.0);
        assert_eq!(out, Vec3::new(1.0, 0.5, 1.0));
    }

    #[test]
    fn commands_apply_in_queue_order() {
        let mut motor = CharacterMotor::new();
        motor.push_command(VelocityCommand::SetVertical { speed: 4.0 });
        motor.push_command(VelocityCommand::BlendPlanar {
            target: Vec3::new(3.0, 0.0, 0.0),
            rate: 20.0,
        });

        let dt = 0.05;
        let mut velocity = Vec3::ZERO;
        for cmd in motor.take_commands() {
            velocity = cmd.apply(velocity, dt);
        }
        // The blend preserves the vertical velocity the jump just set.
        assert!((velocity.y - 4.0).abs() < 1e-5);
        assert!((velocity.x - 3.0).abs() < 1e-5);
        assert!(motor.pending_commands().is_empty());
    }

    #[test]
    fn planar_speed_ignores_vertical() {
        let mut motor = CharacterMotor::new();
        motor.velocity = Vec3::new(3.0, -50.0, 4.0);
        assert!((motor.planar_speed() - 5.0).abs() < 1e-5);
    }
}
