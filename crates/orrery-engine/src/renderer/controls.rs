// renderer/controls.rs
//
// Orbit controls: drag rotates the camera around its look-at target, the
// wheel dollies in and out. Input accumulates into spherical deltas that
// `update` applies once per frame, bleeding them off when damping is on.

use std::f32::consts::PI;
use glam::Vec3;
use super::camera::PerspectiveCamera;

/// Keeps phi away from the poles where the view basis degenerates.
const POLE_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enable_damping: bool,
    /// Fraction of the pending rotation applied per update.
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    /// Exponent on the per-notch zoom scale of 0.95.
    pub zoom_speed: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl OrbitControls {
    pub fn new(damping_factor: f32, min_distance: f32, max_distance: f32) -> Self {
        Self {
            enable_damping: true,
            damping_factor,
            min_distance,
            max_distance,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    /// Queue a rotation from a pointer drag of (dx, dy) pixels.
    /// A drag across the full viewport height turns one full revolution.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.rotate_left(2.0 * PI * dx / viewport_height * self.rotate_speed);
        self.rotate_up(2.0 * PI * dy / viewport_height * self.rotate_speed);
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Queue a wheel zoom. Positive `delta_y` moves the camera away.
    pub fn wheel(&mut self, delta_y: f32) {
        let step = 0.95f32.powf(self.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= step;
        } else if delta_y > 0.0 {
            self.scale /= step;
        }
    }

    /// Drop any pending rotation or zoom.
    pub fn stop(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
    }

    /// Whether rotation is still bleeding off.
    pub fn is_moving(&self) -> bool {
        self.delta_theta.abs() > 1e-6 || self.delta_phi.abs() > 1e-6
    }

    /// Apply pending input to the camera and enforce the distance range.
    /// Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        if radius < 1e-6 {
            self.stop();
            return false;
        }

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.enable_damping {
            theta += self.delta_theta * self.damping_factor;
            phi += self.delta_phi * self.damping_factor;
        } else {
            theta += self.delta_theta;
            phi += self.delta_phi;
        }
        phi = phi.clamp(POLE_EPSILON, PI - POLE_EPSILON);

        let new_radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            new_radius * sin_phi * theta.sin(),
            new_radius * phi.cos(),
            new_radius * sin_phi * theta.cos(),
        );
        let previous = camera.position;
        camera.position = camera.target + new_offset;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;

        previous.distance_squared(camera.position) > 1e-10
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(0.05, 20.0, 500.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::default()
    }

    #[test]
    fn idle_update_keeps_camera_in_place() {
        let mut controls = OrbitControls::default();
        let mut cam = camera();
        controls.update(&mut cam);
        assert!((cam.position - Vec3::new(0.0, 50.0, 100.0)).length() < 1e-3, "got {:?}", cam.position);
    }

    #[test]
    fn drag_rotates_around_target_gradually() {
        let mut controls = OrbitControls::default();
        let mut cam = camera();
        let start = cam.distance();
        controls.rotate_by_pixels(100.0, 0.0, 800.0);

        controls.update(&mut cam);
        let first = cam.position;
        assert!(first.x < 0.0, "rotating left moves the camera to -x, got {first:?}");
        assert!(controls.is_moving());

        for _ in 0..300 {
            controls.update(&mut cam);
        }
        assert!((cam.distance() - start).abs() < 1e-2);
        assert!(!controls.is_moving());
    }

    #[test]
    fn wheel_zoom_clamps_to_range() {
        let mut controls = OrbitControls::default();
        let mut cam = camera();
        for _ in 0..200 {
            controls.wheel(-1.0);
            controls.update(&mut cam);
        }
        assert!((cam.distance() - 20.0).abs() < 1e-3, "distance {}", cam.distance());

        for _ in 0..400 {
            controls.wheel(1.0);
            controls.update(&mut cam);
        }
        assert!((cam.distance() - 500.0).abs() < 1e-2, "distance {}", cam.distance());
    }

    #[test]
    fn polar_angle_never_flips_over_the_pole() {
        let mut controls = OrbitControls::default();
        controls.enable_damping = false;
        let mut cam = camera();
        controls.rotate_up(10.0);
        controls.update(&mut cam);
        assert!(cam.position.y > 0.0);
        assert!((cam.position.x.powi(2) + cam.position.z.powi(2)).sqrt() < 1e-2);
    }
}
