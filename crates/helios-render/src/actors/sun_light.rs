use super::VisualPhaseActor;
use crate::renderable::DirectionalLight;
use glam::Vec3;
use helios_core::config::SunConfig;
use helios_core::palette;
use helios_core::Phase;

/// Directional light that follows the sun and warms toward the horizon.
pub struct SunLight {
    light: DirectionalLight,
    distance: f64,
}

impl SunLight {
    pub fn new(config: &SunConfig) -> Self {
        Self {
            light: DirectionalLight::new(Vec3::ONE, 1.0),
            distance: config.light_distance,
        }
    }

    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    /// Daytime intensity is left to the caller.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.light.intensity = intensity;
    }
}

impl VisualPhaseActor for SunLight {
    fn update(&mut self, angle: f64) {
        self.light.position = palette::orbit_position(angle, self.distance);

        let phase = Phase::at(angle);
        if let Some(color) = palette::sun_light_color(phase, angle) {
            self.light.color = color.to_vec3();
        }
        if let Some(intensity) = palette::sun_light_intensity(phase) {
            self.light.intensity = intensity;
        }
    }

    fn name(&self) -> &'static str {
        "sun-light"
    }
}
