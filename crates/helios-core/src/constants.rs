//! Single source of truth for shared constants.
//! Values used by both Rust and WGSL are injected into the sky shader
//! preamble by the render crate.

use std::f64::consts::PI;

/// Sun angle below which twilight turns into night (sin threshold of -30 degrees).
pub const TWILIGHT_LIMIT_ANGLE: f64 = -PI / 6.0;

/// Distance of the directional sun light from the origin.
pub const SUN_LIGHT_DISTANCE: f64 = 90_000.0;

/// Orbit radius of the visible sun sphere.
pub const SUN_SPHERE_ORBIT: f64 = 400.0;

/// Radius of the sun sphere mesh.
pub const SUN_SPHERE_RADIUS: f32 = 20.0;

/// Radius of the star field sphere (rendered from the inside).
pub const STAR_FIELD_RADIUS: f32 = 100.0;

/// Star field rotation is `angle / STAR_ROTATION_DIVISOR` around Y.
pub const STAR_ROTATION_DIVISOR: f64 = 5.0;

/// Star field material tint before the first night update (0x808080).
pub const STAR_FIELD_BASE_COLOR: u32 = 0x80_80_80;

/// Default star field texture, relative to the asset root.
pub const STAR_FIELD_TEXTURE: &str = "images/galaxy_starfield.png";

/// Radius of the gradient sky dome.
pub const SKY_DOME_RADIUS: f32 = 700.0;

/// Gradient shader `offset` uniform default.
pub const SKY_DOME_OFFSET: f32 = 400.0;

/// Gradient shader `exponent` uniform default.
pub const SKY_DOME_EXPONENT: f32 = 0.6;

/// Length of a full day/night cycle in seconds.
pub const DEFAULT_DAY_DURATION_SECS: f64 = 10.0;

/// Initial sun angle: a sixth of a turn below the horizon.
pub const DEFAULT_START_ANGLE: f64 = -PI / 3.0;

/// Character that toggles fullscreen by default.
pub const DEFAULT_FULLSCREEN_KEY: char = 'f';

/// Value of `Element.ALLOW_KEYBOARD_INPUT` passed to the webkit request call.
pub const WEBKIT_ALLOW_KEYBOARD_INPUT: u32 = 1;
