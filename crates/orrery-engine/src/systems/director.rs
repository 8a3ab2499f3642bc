// systems/director.rs
//
// Camera director: flies the camera toward a selected planet and back to the
// default framing. Talks to the animator only through the `Animator` trait.

use glam::Vec3;
use crate::extensions::easing::Easing;
use crate::extensions::tween::{Animator, TweenId, TweenTarget};
use crate::renderer::camera::PerspectiveCamera;
use super::orbit::OrbitalState;

#[derive(Debug, Clone)]
pub struct CameraDirector {
    /// Camera ends up at body position times this factor.
    pub pull_back: f32,
    /// Added to the camera's Y so it looks slightly down on the body.
    pub vertical_offset: f32,
    /// Fly-to duration in seconds.
    pub duration: f32,
    pub easing: Easing,
    pub home_position: Vec3,
    pub home_target: Vec3,
}

impl CameraDirector {
    pub fn new(home_position: Vec3) -> Self {
        Self {
            pull_back: 1.5,
            vertical_offset: 5.0,
            duration: 1.0,
            easing: Easing::CubicInOut,
            home_position,
            home_target: Vec3::ZERO,
        }
    }

    pub fn with_timing(mut self, duration: f32, easing: Easing) -> Self {
        self.duration = duration;
        self.easing = easing;
        self
    }

    pub fn with_framing(mut self, pull_back: f32, vertical_offset: f32) -> Self {
        self.pull_back = pull_back;
        self.vertical_offset = vertical_offset;
        self
    }

    /// Where the camera settles when flying to a body at `body_position`.
    pub fn fly_target(&self, body_position: Vec3) -> Vec3 {
        body_position * self.pull_back + Vec3::new(0.0, self.vertical_offset, 0.0)
    }

    /// Tween the camera toward the body's current position and retarget the
    /// controls onto it. The body keeps moving; the camera does not follow.
    /// Returns the (position, look-at) tween handles.
    pub fn fly_to(
        &self,
        body: &OrbitalState,
        camera: &PerspectiveCamera,
        animator: &mut dyn Animator,
    ) -> (TweenId, TweenId) {
        let body_position = body.position();
        let position = animator.animate(
            TweenTarget::CameraPosition,
            camera.position,
            self.fly_target(body_position),
            self.duration,
            self.easing,
        );
        let target = animator.animate(
            TweenTarget::ControlsTarget,
            camera.target,
            body_position,
            self.duration,
            self.easing,
        );
        log::debug!("fly_to {} at {:?}", body.name, body_position);
        (position, target)
    }

    /// Snap back to the default framing, cancelling any flight in progress.
    pub fn reset_view(&self, camera: &mut PerspectiveCamera, animator: &mut dyn Animator) {
        animator.cancel_all();
        camera.position = self.home_position;
        camera.target = self.home_target;
    }
}

impl Default for CameraDirector {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 50.0, 100.0))
    }
}

/// Write a tweened value into the camera.
pub fn apply_tween(camera: &mut PerspectiveCamera, target: TweenTarget, value: Vec3) {
    match target {
        TweenTarget::CameraPosition => camera.position = value,
        TweenTarget::ControlsTarget => camera.target = value,
    }
}
