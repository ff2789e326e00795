use crate::actors::{SkyDome, StarField, SunLight, SunSphere, VisualPhaseActor};
use helios_core::config::HeliosConfig;
use helios_core::Phase;

/// The four sky actors, updated together from one sun angle.
/// Actors never read each other's state.
pub struct SkyRig {
    pub star_field: StarField,
    pub sun_light: SunLight,
    pub sun_sphere: SunSphere,
    pub sky_dome: SkyDome,
    angle: f64,
    phase: Option<Phase>,
}

impl SkyRig {
    pub fn new(config: &HeliosConfig) -> Self {
        Self {
            star_field: StarField::new(&config.sky),
            sun_light: SunLight::new(&config.sun),
            sun_sphere: SunSphere::new(&config.sun),
            sky_dome: SkyDome::new(&config.sky),
            angle: 0.0,
            phase: None,
        }
    }

    /// Angle of the last update.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Phase of the last update, `None` before the first.
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    pub fn update(&mut self, angle: f64) {
        let phase = Phase::at(angle);
        if self.phase != Some(phase) {
            log::info!("Sky phase: {} (angle {:.3})", phase, angle);
        }
        for actor in self.actors_mut() {
            actor.update(angle);
        }
        self.angle = angle;
        self.phase = Some(phase);
    }

    pub fn actors_mut(&mut self) -> [&mut dyn VisualPhaseActor; 4] {
        [
            &mut self.star_field,
            &mut self.sun_light,
            &mut self.sun_sphere,
            &mut self.sky_dome,
        ]
    }
}
