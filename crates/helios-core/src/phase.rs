use crate::constants::TWILIGHT_LIMIT_ANGLE;
use std::f64::consts::TAU;

/// Discrete time-of-day classification of a sun angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Day,
    Twilight,
    Night,
}

impl Phase {
    /// Classify a sun angle (radians). Periodic in 2π, total over all finite inputs.
    ///
    /// Day while the sun is on or above the horizon, twilight while it is
    /// less than 30 degrees below it, night otherwise. The angle is reduced
    /// into [0, 2π) first so whole turns land exactly on the same phase.
    pub fn at(angle: f64) -> Phase {
        let height = angle.rem_euclid(TAU).sin();
        if height >= 0.0 {
            Phase::Day
        } else if height > TWILIGHT_LIMIT_ANGLE.sin() {
            Phase::Twilight
        } else {
            Phase::Night
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Day => "day",
            Phase::Twilight => "twilight",
            Phase::Night => "night",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
