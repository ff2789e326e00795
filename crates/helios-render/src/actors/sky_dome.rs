use super::VisualPhaseActor;
use crate::renderable::{ShaderMesh, Side, SphereGeometry, Transform};
use crate::sky::SkyDomeUniforms;
use helios_core::config::SkyConfig;
use helios_core::palette;
use helios_core::Phase;

/// Inside-out sphere shaded with the zenith/horizon gradient.
pub struct SkyDome {
    mesh: ShaderMesh,
}

impl SkyDome {
    pub fn new(config: &SkyConfig) -> Self {
        Self {
            mesh: ShaderMesh {
                geometry: SphereGeometry::new(
                    config.dome_radius,
                    config.dome_width_segments,
                    config.dome_height_segments,
                ),
                uniforms: SkyDomeUniforms::from_config(config),
                side: Side::Back,
                transform: Transform::default(),
                visible: true,
            },
        }
    }

    pub fn mesh(&self) -> &ShaderMesh {
        &self.mesh
    }

    pub fn uniforms(&self) -> &SkyDomeUniforms {
        &self.mesh.uniforms
    }
}

impl VisualPhaseActor for SkyDome {
    fn update(&mut self, angle: f64) {
        let gradient = palette::sky_gradient(Phase::at(angle), angle);
        self.mesh.uniforms.top_color = gradient.top.to_array();
        self.mesh.uniforms.bottom_color = gradient.bottom.to_array();
    }

    fn name(&self) -> &'static str {
        "sky-dome"
    }
}
