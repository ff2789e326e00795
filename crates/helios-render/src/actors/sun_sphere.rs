use super::VisualPhaseActor;
use crate::renderable::{BasicMaterial, MeshObject, Side, SphereGeometry};
use helios_core::color::Rgb8;
use helios_core::config::SunConfig;
use helios_core::palette;
use helios_core::Phase;

/// Visible sun disc orbiting the scene.
/// It is not hidden at night; below the horizon the ground covers it.
pub struct SunSphere {
    mesh: MeshObject,
    orbit: f64,
}

impl SunSphere {
    pub fn new(config: &SunConfig) -> Self {
        let geometry = SphereGeometry::new(config.sphere_radius, 30, 30);
        let material = BasicMaterial {
            color: Rgb8::new(255, 0, 0).to_vec3(),
            side: Side::Front,
            map: None,
        };
        Self {
            mesh: MeshObject::new(geometry, material),
            orbit: config.sphere_orbit,
        }
    }

    pub fn mesh(&self) -> &MeshObject {
        &self.mesh
    }
}

impl VisualPhaseActor for SunSphere {
    fn update(&mut self, angle: f64) {
        self.mesh.transform.position = palette::orbit_position(angle, self.orbit);

        if let Some(color) = palette::sun_sphere_color(Phase::at(angle), angle) {
            self.mesh.material.color = color.to_vec3();
        }
    }

    fn name(&self) -> &'static str {
        "sun-sphere"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_colors_through_the_day() {
        let mut sun = SunSphere::new(&SunConfig::default());
        sun.update(FRAC_PI_2);
        assert_eq!(sun.mesh().material.color, Rgb8::new(255, 255, 205).to_vec3());

        sun.update(-0.2);
        assert_eq!(sun.mesh().material.color, Rgb8::new(255, 55, 5).to_vec3());

        // Night keeps the twilight color and the sphere stays visible.
        sun.update(-FRAC_PI_2);
        assert_eq!(sun.mesh().material.color, Rgb8::new(255, 55, 5).to_vec3());
        assert!(sun.mesh().visible);
    }

    #[test]
    fn test_orbit_position() {
        let mut sun = SunSphere::new(&SunConfig::default());
        sun.update(0.0);
        let p = sun.mesh().transform.position;
        assert_eq!(p.y, 0.0);
        assert_eq!(p.z, 400.0);
    }
}
