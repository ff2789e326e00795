//! Renderable state owned by the sky actors.
//!
//! These mirror the presentation fields a scene graph exposes (visibility,
//! color, position, rotation, intensity). The engine that draws them is
//! external; `SkyRenderer` reads them back each frame.

use glam::Vec3;

/// Which faces of a mesh are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    /// Inside faces only, for domes viewed from within.
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl SphereGeometry {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments,
            height_segments,
        }
    }
}

/// Position plus Euler rotation (radians, XYZ order).
///
/// Fields are `f32` for the GPU. Values computed in `f64` (sun angle,
/// star rotation) are exact only up to the `as f32` cast.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Unlit material: flat color, optional texture map.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicMaterial {
    /// Normalized RGB.
    pub color: Vec3,
    pub side: Side,
    /// Texture path relative to the asset root.
    pub map: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshObject {
    pub geometry: SphereGeometry,
    pub material: BasicMaterial,
    pub transform: Transform,
    pub visible: bool,
}

impl MeshObject {
    pub fn new(geometry: SphereGeometry, material: BasicMaterial) -> Self {
        Self {
            geometry,
            material,
            transform: Transform::default(),
            visible: true,
        }
    }
}

/// Parallel light shining from `position` toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
    pub visible: bool,
}

impl DirectionalLight {
    pub fn new(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            position: Vec3::Y,
            visible: true,
        }
    }
}

/// Mesh drawn with the sky gradient shader.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderMesh {
    pub geometry: SphereGeometry,
    pub uniforms: crate::sky::SkyDomeUniforms,
    pub side: Side,
    pub transform: Transform,
    pub visible: bool,
}
