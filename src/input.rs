//! Input provider abstraction.
//!
//! The motor never reads device input directly. Games implement
//! [`InputSource`] on a resource (keyboard, gamepad, replay, AI) and add
//! [`InputSourcePlugin`] to have [`MovementIntent`] filled from it every
//! tick, or they skip this module entirely and write the intent themselves.

use core::marker::PhantomData;

use bevy::prelude::*;

use crate::intent::MovementIntent;
use crate::motor::CharacterMotor;
use crate::CharacterMotorSet;

/// A virtual input axis consumed by the motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAxis {
    /// Lateral movement, right positive.
    MoveHorizontal,
    /// Forward movement, forward positive.
    MoveVertical,
}

/// A virtual button consumed by the motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputButton {
    /// Trigger a jump.
    Jump,
    /// Sprint modifier.
    Sprint,
    /// Toggle crouching.
    Crouch,
}

/// Capability interface for input providers.
///
/// Implemented on a [`Resource`]; the gathering system polls it once per
/// fixed tick. Axis values are expected in `[-1, 1]`.
pub trait InputSource: Resource {
    /// Current value of a virtual axis.
    fn axis(&self, axis: InputAxis) -> f32;

    /// Whether a virtual button is currently held.
    fn held(&self, button: InputButton) -> bool;

    /// Whether a virtual button was pressed since the last tick.
    fn just_pressed(&self, button: InputButton) -> bool;
}

/// Plugin that feeds [`MovementIntent`] from an [`InputSource`] resource.
///
/// The source resource must be inserted by the game before the first tick.
pub struct InputSourcePlugin<S: InputSource> {
    _marker: PhantomData<S>,
}

impl<S: InputSource> Default for InputSourcePlugin<S> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S: InputSource> Plugin for InputSourcePlugin<S> {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            gather_intent::<S>.in_set(CharacterMotorSet::Intent),
        );
    }
}

/// Copy the input source state into every motor-driven intent.
fn gather_intent<S: InputSource>(
    source: Res<S>,
    mut q_intents: Query<&mut MovementIntent, With<CharacterMotor>>,
) {
    let axes = Vec2::new(
        source.axis(InputAxis::MoveHorizontal),
        source.axis(InputAxis::MoveVertical),
    );
    let sprint = source.held(InputButton::Sprint);
    let jump = source.just_pressed(InputButton::Jump);
    let crouch = source.just_pressed(InputButton::Crouch);

    for mut intent in &mut q_intents {
        intent.set_axes(axes);
        intent.sprint_held = sprint;
        // Assign rather than accumulate: a press is only valid for the tick
        // it was seen on, exactly like a polled button-down edge.
        intent.jump_pressed = jump;
        intent.crouch_pressed = crouch;
    }
}
