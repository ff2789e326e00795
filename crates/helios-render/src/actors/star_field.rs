use super::VisualPhaseActor;
use crate::renderable::{BasicMaterial, MeshObject, Side, SphereGeometry};
use glam::Vec3;
use helios_core::color::Rgb8;
use helios_core::config::SkyConfig;
use helios_core::constants::STAR_FIELD_BASE_COLOR;
use helios_core::palette;
use helios_core::Phase;

/// Textured sphere of stars, shown only at night.
pub struct StarField {
    mesh: MeshObject,
}

impl StarField {
    pub fn new(config: &SkyConfig) -> Self {
        let geometry = SphereGeometry::new(config.star_radius, 32, 32);
        let material = BasicMaterial {
            color: Rgb8::from_hex(STAR_FIELD_BASE_COLOR).to_vec3(),
            side: Side::Back,
            map: Some(config.star_texture.clone()),
        };
        Self {
            mesh: MeshObject::new(geometry, material),
        }
    }

    pub fn mesh(&self) -> &MeshObject {
        &self.mesh
    }
}

impl VisualPhaseActor for StarField {
    fn update(&mut self, angle: f64) {
        let look = palette::star_field(Phase::at(angle), angle);
        self.mesh.visible = look.visible;
        if look.visible {
            self.mesh.transform.rotation.y = look.rotation_y as f32;
            self.mesh.material.color = Vec3::splat(look.intensity);
        }
    }

    fn name(&self) -> &'static str {
        "star-field"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_hidden_unless_night() {
        let mut stars = StarField::new(&SkyConfig::default());
        let mut angle = -7.0;
        while angle < 7.0 {
            stars.update(angle);
            assert_eq!(
                stars.mesh().visible,
                Phase::at(angle) == Phase::Night,
                "angle {angle}"
            );
            angle += 0.05;
        }
    }

    #[test]
    fn test_night_rotation_and_tint() {
        let mut stars = StarField::new(&SkyConfig::default());
        let angle = -FRAC_PI_2;
        stars.update(angle);
        assert!(stars.mesh().visible);
        assert_eq!(stars.mesh().transform.rotation.y, (angle / 5.0) as f32);
        assert_eq!(stars.mesh().material.color, Vec3::splat(1.0));
    }

    #[test]
    fn test_rotation_is_absolute() {
        let mut stars = StarField::new(&SkyConfig::default());
        stars.update(-1.2);
        stars.update(-1.2);
        assert_eq!(stars.mesh().transform.rotation.y, (-1.2f64 / 5.0) as f32);
        stars.update(-2.0);
        assert_eq!(stars.mesh().transform.rotation.y, (-2.0f64 / 5.0) as f32);
    }

    #[test]
    fn test_initial_material() {
        let stars = StarField::new(&SkyConfig::default());
        assert_eq!(stars.mesh().material.side, Side::Back);
        assert_eq!(stars.mesh().geometry.radius, 100.0);
        assert_eq!(
            stars.mesh().material.map.as_deref(),
            Some("images/galaxy_starfield.png")
        );
    }
}
