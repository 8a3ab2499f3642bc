use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use crate::systems::picking::Ray;

/// Perspective camera looking from `position` toward `target`, Y-up.
/// `target` doubles as the orbit-controls pivot.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 32;
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_deg,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// World → view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// View → clip transform, OpenGL depth range [-1, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
        }
    }

    /// Recompute the aspect ratio for a new viewport size.
    /// Degenerate sizes are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Distance from the camera to its look-at target.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// World-space ray from the camera through a point in normalized device
    /// coordinates (both axes in [-1, 1], +Y up).
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let inverse = self.view_projection().inverse();
        let through = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.5));
        Ray::new(self.position, through - self.position)
    }

    /// Project a world point to NDC. Points behind the camera come out mirrored.
    pub fn project_to_ndc(&self, point: Vec3) -> Vec3 {
        self.view_projection().project_point3(point)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.1, 1000.0).with_position(Vec3::new(0.0, 50.0, 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_32_floats() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }

    #[test]
    fn target_projects_to_center() {
        let cam = PerspectiveCamera::default();
        let ndc = cam.project_to_ndc(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5, "got {ndc:?}");
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = PerspectiveCamera::default();
        let ray = cam.ray_from_ndc(0.0, 0.0);
        let expected = (cam.target - cam.position).normalize();
        assert!((ray.direction - expected).length() < 1e-4, "got {:?}", ray.direction);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn ray_round_trips_through_projection() {
        let cam = PerspectiveCamera::new(75.0, 16.0 / 9.0, 0.1, 1000.0)
            .with_position(Vec3::new(0.0, 50.0, 100.0));
        let world = Vec3::new(33.5, 0.0, 52.17);
        let ndc = cam.project_to_ndc(world);
        let ray = cam.ray_from_ndc(ndc.x, ndc.y);
        let to_point = (world - ray.origin).normalize();
        assert!((ray.direction - to_point).length() < 1e-3);
    }

    #[test]
    fn set_viewport_updates_aspect() {
        let mut cam = PerspectiveCamera::default();
        cam.set_viewport(1920.0, 1080.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        cam.set_viewport(0.0, 1080.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }
}
