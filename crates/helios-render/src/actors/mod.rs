pub mod sky_dome;
pub mod star_field;
pub mod sun_light;
pub mod sun_sphere;

pub use sky_dome::SkyDome;
pub use star_field::StarField;
pub use sun_light::SunLight;
pub use sun_sphere::SunSphere;

/// A visual object whose presentation is a function of the sun angle.
///
/// `update` derives the phase itself and overwrites the owned renderable's
/// fields; calling it twice with the same angle leaves the same state.
pub trait VisualPhaseActor {
    fn update(&mut self, angle: f64);

    fn name(&self) -> &'static str;
}
