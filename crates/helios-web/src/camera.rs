use helios_core::resize::ProjectionCamera;
use glam::{Mat4, Vec3};

const NEAR: f32 = 0.1;
/// Past the sky dome so reconstructed far-plane rays cover it.
const FAR: f32 = 2_000.0;
const PITCH_LIMIT: f32 = 1.5;

/// Free-look camera standing at a fixed point inside the sky dome.
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y_rad: f32,
    aspect: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 2.0, 0.0),
            yaw: 0.0,
            pitch: 0.25,
            fov_y_rad: std::f32::consts::FRAC_PI_4,
            aspect,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Unit view direction. Yaw 0 faces +Z, where the sun rises.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        )
    }

    pub fn look(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_to_rh(self.position, self.forward(), Vec3::Y);
        self.projection * view
    }

    pub fn inverse_view_proj(&self) -> Mat4 {
        self.view_proj().inverse()
    }
}

impl ProjectionCamera for Camera {
    fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(self.fov_y_rad, self.aspect, NEAR, FAR);
    }
}
