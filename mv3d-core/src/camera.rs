//! Camera and lighting state, and the per-frame transform composition.

use glam::{Mat4, Vec3};

use crate::mesh::Mesh;

/// Distance of the default camera from the origin along each axis.
pub const CAMERA_DISTANCE: f32 = 8.0;
/// How far one scroll notch moves the camera along its forward axis.
pub const SCROLL_SENSITIVITY: f32 = 0.3;
/// Largest dimension of the displayed model, in world units. The axis gizmo
/// is 2.0 long, so this keeps the model comfortably inside it.
pub const MODEL_DISPLAY_SIZE: f32 = 1.5;

pub const FOV_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Camera position and orientation. Mutated only by scroll zoom.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
}

impl Camera {
    /// Places the camera on the (1,1,1) diagonal looking at the origin.
    pub fn new() -> Self {
        let position = Vec3::splat(CAMERA_DISTANCE);
        Self {
            position,
            forward: (Vec3::ZERO - position).normalize(),
            up: Vec3::Y,
        }
    }

    /// Moves the camera along its forward axis; positive deltas zoom in.
    /// Linear and unclamped, so overshooting past the origin is allowed.
    pub fn zoom(&mut self, delta: f32) {
        self.position += self.forward * delta * SCROLL_SENSITIVITY;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed light and material parameters, read-only after setup.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    pub ambient_strength: f32,
    pub specular_strength: f32,
    pub shininess: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(2.0, 2.0, 2.0),
            color: Vec3::ONE,
            ambient_strength: 0.1,
            specular_strength: 0.5,
            shininess: 32.0,
        }
    }
}

/// Model matrix that scales the mesh about the origin first, then
/// re-centers it, so a vertex `v` maps to `(v - center) * s`. Translating
/// before scaling would not re-center correctly.
pub fn model_matrix(mesh: &Mesh) -> Mat4 {
    let s = mesh.scale * MODEL_DISPLAY_SIZE;
    Mat4::from_translation(-mesh.center * s) * Mat4::from_scale(Vec3::splat(s))
}

pub fn projection_matrix(aspect_ratio: f32) -> Mat4 {
    Mat4::perspective_rh_gl(
        FOV_DEGREES.to_radians(),
        aspect_ratio,
        NEAR_PLANE,
        FAR_PLANE,
    )
}
