//! Day/night color and intensity model.
//!
//! Every function here is a pure mapping from `(phase, angle)` to the
//! presentation values one sky actor writes. Channel formulas keep the
//! floor-then-offset arithmetic of the reference look so that colors match
//! frame for frame; clamping happens only at the `Rgb8` conversion.

use crate::color::{RawRgb, Rgb8};
use crate::constants::STAR_ROTATION_DIVISOR;
use crate::phase::Phase;
use glam::Vec3;

/// Fixed day zenith color of the sky dome.
pub const DAY_SKY_TOP: Rgb8 = Rgb8::new(0, 120, 255);

/// Fixed twilight color of the sun sphere.
pub const TWILIGHT_SUN_SPHERE: Rgb8 = Rgb8::new(255, 55, 5);

/// Sun light intensity while the sun is in twilight.
pub const TWILIGHT_LIGHT_INTENSITY: f32 = 1.0;

/// Sun light intensity at night.
pub const NIGHT_LIGHT_INTENSITY: f32 = 0.0;

fn floor_i32(value: f64) -> i32 {
    value.floor() as i32
}

/// Warm daylight ramp shared by the sun light and the day horizon.
pub fn day_light_raw(angle: f64) -> RawRgb {
    let s = angle.sin();
    RawRgb::new(255, floor_i32(s * 200.0) + 55, floor_i32(s * 200.0))
}

/// Red-orange twilight ramp shared by the sun light and the twilight horizon.
pub fn twilight_light_raw(angle: f64) -> RawRgb {
    let s = angle.sin();
    RawRgb::new(
        255 - floor_i32(s * 510.0 * -1.0),
        55 - floor_i32(s * 110.0 * -1.0),
        0,
    )
}

/// Twilight zenith: blue fading toward black as the sun sinks.
pub fn twilight_sky_top_raw(angle: f64) -> RawRgb {
    let s = angle.sin();
    RawRgb::new(
        0,
        120 - floor_i32(s * 240.0 * -1.0),
        255 - floor_i32(s * 510.0 * -1.0),
    )
}

/// Sun light color for the phase. `None` means the color is left unchanged.
pub fn sun_light_color(phase: Phase, angle: f64) -> Option<Rgb8> {
    match phase {
        Phase::Day => Some(day_light_raw(angle).clamped()),
        Phase::Twilight => Some(twilight_light_raw(angle).clamped()),
        Phase::Night => None,
    }
}

/// Sun light intensity for the phase. `None` leaves the externally driven
/// daytime intensity as it is.
pub fn sun_light_intensity(phase: Phase) -> Option<f32> {
    match phase {
        Phase::Day => None,
        Phase::Twilight => Some(TWILIGHT_LIGHT_INTENSITY),
        Phase::Night => Some(NIGHT_LIGHT_INTENSITY),
    }
}

/// Sun sphere color for the phase. At night the sphere keeps its last color.
pub fn sun_sphere_color(phase: Phase, angle: f64) -> Option<Rgb8> {
    match phase {
        Phase::Day => {
            let s = angle.sin();
            let raw = RawRgb::new(255, floor_i32(s * 200.0) + 55, floor_i32(s * 200.0) + 5);
            Some(raw.clamped())
        }
        Phase::Twilight => Some(TWILIGHT_SUN_SPHERE),
        Phase::Night => None,
    }
}

/// Zenith and horizon colors of the sky dome gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyGradient {
    pub top: Rgb8,
    pub bottom: Rgb8,
}

pub fn sky_gradient(phase: Phase, angle: f64) -> SkyGradient {
    match phase {
        Phase::Day => SkyGradient {
            top: DAY_SKY_TOP,
            bottom: day_light_raw(angle).clamped(),
        },
        Phase::Twilight => SkyGradient {
            top: twilight_sky_top_raw(angle).clamped(),
            bottom: twilight_light_raw(angle).clamped(),
        },
        Phase::Night => SkyGradient {
            top: Rgb8::BLACK,
            bottom: Rgb8::BLACK,
        },
    }
}

/// Presentation of the star field for one angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarFieldLook {
    pub visible: bool,
    /// Greyscale brightness in `[0, 1]`; meaningful only when visible.
    pub intensity: f32,
    /// Absolute rotation around Y in radians; meaningful only when visible.
    pub rotation_y: f64,
}

pub fn star_field(phase: Phase, angle: f64) -> StarFieldLook {
    match phase {
        Phase::Day | Phase::Twilight => StarFieldLook {
            visible: false,
            intensity: 0.0,
            rotation_y: 0.0,
        },
        Phase::Night => StarFieldLook {
            visible: true,
            intensity: angle.sin().abs() as f32,
            rotation_y: angle / STAR_ROTATION_DIVISOR,
        },
    }
}

/// Position on the sun's orbit in the YZ plane at `distance` from the origin.
pub fn orbit_position(angle: f64, distance: f64) -> Vec3 {
    Vec3::new(
        0.0,
        (angle.sin() * distance) as f32,
        (angle.cos() * distance) as f32,
    )
}
