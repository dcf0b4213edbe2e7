//! Movement intent components.
//!
//! Intents represent the desired movement from player input or AI. The
//! control systems read these intents and drive the motor accordingly.
//! Games either attach an [`InputSource`](crate::input::InputSource) that
//! fills the intent every tick, or write it directly.

use bevy::prelude::*;

/// Desired movement for one character.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use tpc_character_controller::prelude::*;
///
/// let mut intent = MovementIntent::new();
/// intent.set_axes(Vec2::new(0.0, 1.0));
/// assert!(intent.is_moving());
/// assert_eq!(intent.move_amount(), 1.0);
///
/// intent.press_jump();
/// assert!(intent.take_jump());
/// // The edge is consumed.
/// assert!(!intent.take_jump());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Movement axes: `x` is lateral (right positive), `y` is forward.
    /// Each component is clamped to `[-1, 1]`.
    pub axes: Vec2,
    /// Whether the sprint modifier is held.
    pub sprint_held: bool,
    /// Pending jump command. Consumed by the jump system.
    pub jump_pressed: bool,
    /// Pending crouch toggle. Consumed by the crouch system.
    pub crouch_pressed: bool,
}

impl MovementIntent {
    /// Create a new empty intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the movement axes, clamping each component to `[-1, 1]`.
    pub fn set_axes(&mut self, axes: Vec2) {
        self.axes = axes.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    /// Normalized move amount: `|forward| + |lateral|`, clamped to `[0, 1]`.
    pub fn move_amount(&self) -> f32 {
        (self.axes.x.abs() + self.axes.y.abs()).clamp(0.0, 1.0)
    }

    /// Whether there is any movement input.
    pub fn is_moving(&self) -> bool {
        self.move_amount() > 0.0
    }

    /// Request a jump. The request stays pending until consumed.
    pub fn press_jump(&mut self) {
        self.jump_pressed = true;
    }

    /// Consume a pending jump request.
    pub fn take_jump(&mut self) -> bool {
        core::mem::take(&mut self.jump_pressed)
    }

    /// Request a crouch toggle. The request stays pending until consumed.
    pub fn press_crouch(&mut self) {
        self.crouch_pressed = true;
    }

    /// Consume a pending crouch toggle.
    pub fn take_crouch(&mut self) -> bool {
        core::mem::take(&mut self.crouch_pressed)
    }

    /// Clear all pending input.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
