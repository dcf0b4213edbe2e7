//! Motion state flags.
//!
//! [`MotionState`] is the single authoritative record of what the character
//! is doing this tick. It is written only by the locomotion systems and read
//! afterwards by animation, audio, and gameplay consumers.

use bevy::prelude::*;

/// Combinable motion flags for a character.
///
/// Invariant: `jumping` and `sliding` are never both true. A slide clears
/// `grounded` while remaining a ground-contact condition, so a jump (which
/// requires `grounded`) can never start during one.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[reflect(Component)]
pub struct MotionState {
    /// Feet are supported by walkable ground.
    pub grounded: bool,
    /// A jump is in progress (timer still running).
    pub jumping: bool,
    /// The character is sliding down a steep surface.
    pub sliding: bool,
    /// The character is crouched.
    pub crouching: bool,
    /// The body faces the camera and strafes laterally.
    pub strafing: bool,
    /// The sprint modifier is active.
    pub sprinting: bool,
}

impl MotionState {
    /// Neither grounded nor in surface contact.
    pub fn airborne(&self) -> bool {
        !self.grounded && !self.sliding
    }
}
