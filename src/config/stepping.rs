//! Configuration for step detection and step assist.

use bevy::prelude::*;

/// Configuration for step detection and step assist.
///
/// The step probe looks for ledges whose surface lies in the height window
/// `(offset_start, offset_end)` above the feet. Ledges below the window are
/// handled by plain ground contact, ledges above it are walls.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct StepConfig {
    /// Lower edge of the steppable height window (units above the feet).
    pub offset_start: f32,

    /// Upper edge of the steppable height window (units above the feet).
    pub offset_end: f32,

    /// Scale of the velocity nudge that carries the character up a step.
    pub smooth: f32,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            offset_start: 0.05,
            offset_end: 0.45,
            smooth: 4.0,
        }
    }
}
