//! Speed table configuration.
//!
//! Twelve scalar speeds indexed by locomotion mode, crouch state, and speed
//! tier. Immutable after configuration: the resolver only ever reads it.

use bevy::prelude::*;

use super::locomotion::LocomotionMode;

/// The three speed tiers derived from the effective move amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum SpeedTier {
    /// Gentle input, up to and including half deflection.
    Walk,
    /// Anything above half and up to full deflection.
    Run,
    /// Input boosted past full deflection by the sprint modifier.
    Sprint,
}

impl SpeedTier {
    /// Tier for an effective move amount.
    ///
    /// The boundaries are inclusive: exactly `0.5` walks, exactly `1.0`
    /// runs. Only sprint-boosted amounts exceed `1.0`.
    pub fn from_amount(amount: f32) -> Self {
        if amount <= 0.5 {
            Self::Walk
        } else if amount <= 1.0 {
            Self::Run
        } else {
            Self::Sprint
        }
    }
}

/// Walk/run/sprint speeds for one (mode, crouch) combination.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct SpeedTiers {
    /// Walk tier speed (units/second).
    pub walk: f32,
    /// Run tier speed (units/second).
    pub run: f32,
    /// Sprint tier speed (units/second).
    pub sprint: f32,
}

impl SpeedTiers {
    /// Speed for a tier.
    pub fn get(&self, tier: SpeedTier) -> f32 {
        match tier {
            SpeedTier::Walk => self.walk,
            SpeedTier::Run => self.run,
            SpeedTier::Sprint => self.sprint,
        }
    }
}

/// The full speed table: `(mode, crouch, tier)` → scalar speed.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct SpeedTable {
    /// Free mode, standing.
    pub free: SpeedTiers,
    /// Strafe mode, standing.
    pub strafe: SpeedTiers,
    /// Free mode, crouched.
    pub free_crouch: SpeedTiers,
    /// Strafe mode, crouched.
    pub strafe_crouch: SpeedTiers,
}

impl Default for SpeedTable {
    fn default() -> Self {
        let standing = SpeedTiers {
            walk: 2.5,
            run: 3.0,
            sprint: 4.0,
        };
        let crouched = SpeedTiers {
            walk: 1.5,
            run: 2.0,
            sprint: 2.5,
        };
        Self {
            free: standing,
            strafe: standing,
            free_crouch: crouched,
            strafe_crouch: crouched,
        }
    }
}

impl SpeedTable {
    /// Look up the configured speed for a mode, crouch state and tier.
    pub fn speed(&self, mode: LocomotionMode, crouching: bool, tier: SpeedTier) -> f32 {
        let tiers = match (mode, crouching) {
            (LocomotionMode::Free, false) => &self.free,
            (LocomotionMode::Strafe, false) => &self.strafe,
            (LocomotionMode::Free, true) => &self.free_crouch,
            (LocomotionMode::Strafe, true) => &self.strafe_crouch,
        };
        tiers.get(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(SpeedTier::from_amount(0.0), SpeedTier::Walk);
        assert_eq!(SpeedTier::from_amount(0.5), SpeedTier::Walk);
        assert_eq!(SpeedTier::from_amount(0.51), SpeedTier::Run);
        assert_eq!(SpeedTier::from_amount(1.0), SpeedTier::Run);
        assert_eq!(SpeedTier::from_amount(1.01), SpeedTier::Sprint);
        assert_eq!(SpeedTier::from_amount(2.0), SpeedTier::Sprint);
    }

    #[test]
    fn table_selects_by_mode_and_crouch() {
        let table = SpeedTable {
            free: SpeedTiers {
                walk: 1.0,
                run: 2.0,
                sprint: 3.0,
            },
            strafe: SpeedTiers {
                walk: 4.0,
                run: 5.0,
                sprint: 6.0,
            },
            free_crouch: SpeedTiers {
                walk: 7.0,
                run: 8.0,
                sprint: 9.0,
            },
            strafe_crouch: SpeedTiers {
                walk: 10.0,
                run: 11.0,
                sprint: 12.0,
            },
        };

        assert_eq!(
            table.speed(LocomotionMode::Free, false, SpeedTier::Walk),
            1.0
        );
        assert_eq!(
            table.speed(LocomotionMode::Strafe, false, SpeedTier::Run),
            5.0
        );
        assert_eq!(
            table.speed(LocomotionMode::Free, true, SpeedTier::Sprint),
            9.0
        );
        assert_eq!(
            table.speed(LocomotionMode::Strafe, true, SpeedTier::Walk),
            10.0
        );
    }
}
