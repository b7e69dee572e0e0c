use glam::{Mat4, Vec3};

// ---------------------------------------------------------------------------
// Camera — yaw/pitch eye point
// ---------------------------------------------------------------------------

/// A free camera described by an eye position and yaw/pitch angles
/// (radians). Yaw is measured in the xz-plane from +x toward +z, pitch
/// upward from the horizon.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Camera {
    pub fn new<V: Into<Vec3>>(position: V, yaw: f32, pitch: f32) -> Self {
        Self {
            position: position.into(),
            yaw,
            pitch,
        }
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.sin_cos();
        Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Perspective projection. `glam::Mat4::perspective_rh` maps depth to
/// [0, 1], which is what wgpu expects, so no extra conversion matrix is
/// involved.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub aspect: f32,
    pub fov_y: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, fov_y: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            fov_y,
            z_near,
            z_far,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far)
    }
}

/// Combined matrix uploaded to the scene shader.
pub fn view_proj(camera: &Camera, projection: &Projection) -> Mat4 {
    projection.matrix() * camera.view_matrix()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
