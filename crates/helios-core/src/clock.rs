use crate::config::ClockConfig;
use std::f64::consts::TAU;

/// Drives the sun angle from elapsed frame time.
pub struct SunClock {
    angle: f64,
    day_duration_secs: f64,
    paused: bool,
}

impl SunClock {
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            angle: config.start_angle,
            day_duration_secs: config.day_duration_secs,
            paused: false,
        }
    }

    /// Current sun angle in radians. Not wrapped; phase math is periodic.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Advance by `dt_secs` of wall time; one full turn per day duration.
    /// Negative deltas rewind. Returns the new angle.
    pub fn advance(&mut self, dt_secs: f64) -> f64 {
        if !self.paused && dt_secs.is_finite() {
            self.angle += dt_secs / self.day_duration_secs * TAU;
            // Keep the accumulator small so long sessions do not lose precision.
            if self.angle.abs() > 1_000.0 * TAU {
                self.angle = self.angle.rem_euclid(TAU);
            }
        }
        self.angle
    }
}
