//! Sky dome gradient.
//! The dome is shaded by blending a horizon color into a zenith color:
//! `mix(bottom, top, max(pow(h, exponent), 0))` with
//! `h = normalize(world_pos + offset).y`. The scalar offset is added to every
//! component of the world position, matching `shaders/sky/gradient.wgsl`.

use glam::Vec3;
use helios_core::color::hsl_to_rgb;
use helios_core::config::SkyConfig;

/// Default zenith color before the first update (HSL 0.6, 1, 0.75).
pub fn default_sky_top() -> Vec3 {
    hsl_to_rgb(0.6, 1.0, 0.75)
}

/// Default horizon color before the first update.
pub const DEFAULT_SKY_BOTTOM: [f32; 3] = [1.0, 1.0, 1.0];

/// Gradient uniforms (32 bytes, matches WGSL SkyDome).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyDomeUniforms {
    pub top_color: [f32; 3],
    pub offset: f32,
    pub bottom_color: [f32; 3],
    pub exponent: f32,
}

impl SkyDomeUniforms {
    pub fn from_config(config: &SkyConfig) -> Self {
        Self {
            top_color: default_sky_top().to_array(),
            offset: config.offset,
            bottom_color: DEFAULT_SKY_BOTTOM,
            exponent: config.exponent,
        }
    }
}

impl Default for SkyDomeUniforms {
    fn default() -> Self {
        Self::from_config(&SkyConfig::default())
    }
}

/// CPU evaluation of the gradient at a world position on the dome.
pub fn gradient_at(world_pos: Vec3, uniforms: &SkyDomeUniforms) -> Vec3 {
    let h = (world_pos + Vec3::splat(uniforms.offset)).normalize_or_zero().y;
    // pow of a negative base is NaN; the shader's max(.., 0) picks the horizon color.
    let t = if h > 0.0 {
        h.powf(uniforms.exponent).max(0.0)
    } else {
        0.0
    };
    let bottom = Vec3::from(uniforms.bottom_color);
    let top = Vec3::from(uniforms.top_color);
    bottom.lerp(top, t)
}
