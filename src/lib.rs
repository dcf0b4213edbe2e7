//! Physics-based third person character motor for Bevy.
//!
//! The motor turns input intents plus sensor probes into a grounded /
//! airborne / sliding / jumping state machine and a stream of velocity
//! commands for a rigid body. Physics engines plug in through
//! [`CharacterPhysicsBackend`](backend::CharacterPhysicsBackend); the
//! `avian3d` feature (default) provides [`avian::Avian3dBackend`].
//!
//! # Architecture
//!
//! Every fixed tick runs an ordered chain of system sets
//! ([`CharacterMotorSet`]):
//!
//! 1. **Intent** — an optional [`InputSource`](input::InputSource) fills
//!    [`MovementIntent`](intent::MovementIntent).
//! 2. **Sensors** — the backend probes ground, slope, steps and clearance.
//! 3. **Locomotion** — the state machine updates
//!    [`MotionState`](state::MotionState), rotates the body and shapes the
//!    input channels.
//! 4. **Resolve** — the speed table maps the channels to a target velocity.
//! 5. **FinalApplication** — the backend applies the queued
//!    [`VelocityCommand`](motor::VelocityCommand)s to the rigid body.
//!
//! Animation and health consumers read the result on the variable tick.
//!
//! # Example
//!
//! ```no_run
//! use bevy::prelude::*;
//! use tpc_character_controller::prelude::*;
//!
//! App::new()
//!     .add_plugins(MinimalPlugins)
//!     .add_plugins(CharacterMotorPlugin::<NoopBackend>::default())
//!     .run();
//! ```

use core::marker::PhantomData;

use bevy::prelude::*;

pub mod animation;
#[cfg(feature = "avian3d")]
pub mod avian;
pub mod backend;
pub mod config;
pub mod detection;
pub mod health;
pub mod input;
pub mod intent;
pub mod locomotion;
pub mod motor;
pub mod slope;
pub mod state;
pub mod velocity;

use backend::CharacterPhysicsBackend;

/// The fixed-tick stages of the motor, in execution order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterMotorSet {
    /// Input sources fill the movement intents.
    Intent,
    /// Backend sensor systems probe the environment.
    Sensors,
    /// The locomotion state machine runs.
    Locomotion,
    /// Velocity targets are resolved from the speed table.
    Resolve,
    /// Queued velocity commands reach the rigid body.
    FinalApplication,
}

/// The character motor plugin, generic over the physics backend.
///
/// Adds the motor systems, the backend's plugin, and the animation/health
/// consumers. Spawn a character by inserting
/// [`CharacterMotor`](motor::CharacterMotor) and
/// [`MotorConfig`](config::MotorConfig) next to the backend's rigid-body
/// components.
pub struct CharacterMotorPlugin<B: CharacterPhysicsBackend> {
    _marker: PhantomData<B>,
}

impl<B: CharacterPhysicsBackend> Default for CharacterMotorPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<B: CharacterPhysicsBackend> Plugin for CharacterMotorPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<animation::AnimatorParams>()
            .register_type::<config::MotorConfig>()
            .register_type::<health::CharacterHealth>()
            .register_type::<intent::MovementIntent>()
            .register_type::<locomotion::MotionReference>()
            .register_type::<motor::CharacterMotor>()
            .register_type::<state::MotionState>();

        app.add_message::<health::Damage>();

        app.configure_sets(
            FixedUpdate,
            (
                CharacterMotorSet::Intent,
                CharacterMotorSet::Sensors,
                CharacterMotorSet::Locomotion,
                CharacterMotorSet::Resolve,
                CharacterMotorSet::FinalApplication,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                locomotion::update_target_direction,
                locomotion::check_ground,
                locomotion::control_jump,
                locomotion::control_locomotion,
                locomotion::control_sprint,
                locomotion::control_crouch,
            )
                .chain()
                .in_set(CharacterMotorSet::Locomotion),
        );
        app.add_systems(
            FixedUpdate,
            (velocity::speed_observer, velocity::air_control)
                .chain()
                .in_set(CharacterMotorSet::Resolve),
        );
        app.add_systems(
            FixedUpdate,
            backend::apply_velocity_commands::<B>.in_set(CharacterMotorSet::FinalApplication),
        );

        // Variable-tick consumers run after the fixed loop of the frame.
        app.add_systems(
            Update,
            (
                animation::sync_animator_params,
                health::apply_damage,
                health::update_health,
            )
                .chain(),
        );

        app.add_plugins(B::plugin());
    }
}

pub mod prelude {
    //! Commonly used types.

    #[cfg(feature = "avian3d")]
    pub use crate::avian::Avian3dBackend;
    pub use crate::animation::AnimatorParams;
    pub use crate::backend::{CharacterPhysicsBackend, NoopBackend, NoopVelocity};
    pub use crate::config::{
        CrouchConfig, GroundingConfig, JumpConfig, LocomotionConfig, LocomotionMode, MotorConfig,
        SpeedTable, SpeedTier, SpeedTiers, StepConfig,
    };
    pub use crate::detection::{GroundSample, SensorCast, StepSample};
    pub use crate::health::{CharacterHealth, Damage, FallDamageBand, RegenerationConfig};
    pub use crate::input::{InputAxis, InputButton, InputSource, InputSourcePlugin};
    pub use crate::intent::MovementIntent;
    pub use crate::locomotion::MotionReference;
    pub use crate::motor::{CharacterMotor, VelocityCommand};
    pub use crate::slope::SlopeClass;
    pub use crate::state::MotionState;
    pub use crate::{CharacterMotorPlugin, CharacterMotorSet};
}
