//! Character health, fall damage and regeneration.
//!
//! Health runs on the variable tick after the motor has settled its state
//! for the frame. Regeneration is plain polled countdown state: an idle
//! delay, then per-interval increments, interrupted by any damage. Death
//! locks the motor; revival unlocks it.

use bevy::prelude::*;

use crate::motor::CharacterMotor;
use crate::state::MotionState;

/// One fall-damage band: landing after a fall with a height inside
/// `(min_height, max_height)` deals `damage`.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct FallDamageBand {
    /// Exclusive lower edge of the fall height window.
    pub min_height: f32,
    /// Exclusive upper edge of the fall height window.
    pub max_height: f32,
    /// Damage dealt on landing.
    pub damage: i32,
}

/// Regeneration parameters.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct RegenerationConfig {
    /// Seconds without taking damage before regeneration starts.
    pub delay: f32,
    /// Seconds between increments once regenerating.
    pub interval: f32,
    /// Health restored per increment.
    pub amount: i32,
}

impl Default for RegenerationConfig {
    fn default() -> Self {
        Self {
            delay: 5.0,
            interval: 0.5,
            amount: 1,
        }
    }
}

/// Damage request for a character. Consumed by [`apply_damage`].
#[derive(Message, Debug, Clone, Copy)]
pub struct Damage {
    /// The character taking the damage.
    pub entity: Entity,
    /// Amount of health to remove.
    pub amount: i32,
}

/// Health state for one character.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct CharacterHealth {
    health: i32,
    max_health: i32,
    /// Fall-damage bands checked on landing.
    pub fall_damage: Vec<FallDamageBand>,
    /// Regeneration parameters, if regeneration is enabled.
    pub regeneration: Option<RegenerationConfig>,

    delay_left: f32,
    interval_left: f32,
    regenerating: bool,
    peak_height: f32,
    was_dead: bool,
}

impl Default for CharacterHealth {
    fn default() -> Self {
        Self::new(100)
    }
}

impl CharacterHealth {
    /// Full health with the given maximum.
    pub fn new(max_health: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            fall_damage: Vec::new(),
            regeneration: None,
            delay_left: 0.0,
            interval_left: 0.0,
            regenerating: false,
            peak_height: 0.0,
            was_dead: false,
        }
    }

    /// Enable regeneration.
    pub fn with_regeneration(mut self, regeneration: RegenerationConfig) -> Self {
        self.regeneration = Some(regeneration);
        self
    }

    /// Add fall-damage bands.
    pub fn with_fall_damage(mut self, bands: impl IntoIterator<Item = FallDamageBand>) -> Self {
        self.fall_damage.extend(bands);
        self
    }

    /// Current health.
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Maximum health.
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Whether the character is alive.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Health as a percentage of the maximum.
    pub fn health_percent(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32 * 100.0
    }

    /// Remove health and interrupt any regeneration in progress.
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
        self.regenerating = false;
        self.delay_left = self
            .regeneration
            .map(|regeneration| regeneration.delay)
            .unwrap_or(0.0);
    }

    /// Restore health up to the maximum.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    fn tick_regeneration(&mut self, dt: f32) {
        let Some(regeneration) = self.regeneration else {
            return;
        };
        if self.health >= self.max_health {
            self.regenerating = false;
            self.delay_left = regeneration.delay;
            return;
        }

        if !self.regenerating {
            self.delay_left -= dt;
            if self.delay_left <= 0.0 {
                self.regenerating = true;
                self.interval_left = regeneration.interval;
            }
        } else {
            self.interval_left -= dt;
            if self.interval_left <= 0.0 {
                self.heal(regeneration.amount);
                self.interval_left = regeneration.interval;
            }
        }
    }

    fn tick_fall_damage(&mut self, grounded: bool, height: f32) {
        if !grounded {
            if self.peak_height < height {
                self.peak_height = height;
            }
        } else if self.peak_height > height {
            let fall = self.peak_height - height;
            let hits: Vec<i32> = self
                .fall_damage
                .iter()
                .filter(|band| fall > band.min_height && fall < band.max_height)
                .map(|band| band.damage)
                .collect();
            for damage in hits {
                self.take_damage(damage);
                self.peak_height = height;
            }
        }
    }
}

/// Drain queued [`Damage`] messages.
pub fn apply_damage(mut messages: MessageReader<Damage>, mut q_health: Query<&mut CharacterHealth>) {
    for message in messages.read() {
        if let Ok(mut health) = q_health.get_mut(message.entity) {
            health.take_damage(message.amount);
        }
    }
}

/// Per-frame health bookkeeping: death lock, regeneration, fall damage.
pub fn update_health(
    time: Res<Time>,
    mut q_health: Query<(
        &mut CharacterHealth,
        &mut CharacterMotor,
        &MotionState,
        &GlobalTransform,
    )>,
) {
    let dt = time.delta_secs();
    for (mut health, mut motor, state, transform) in &mut q_health {
        if !health.is_alive() {
            if !health.was_dead {
                motor.lock_movement = true;
                health.was_dead = true;
            }
            continue;
        }
        if health.was_dead {
            motor.lock_movement = false;
            health.was_dead = false;
        }

        health.tick_regeneration(dt);
        health.tick_fall_damage(state.grounded, transform.translation().y);
    }
}
