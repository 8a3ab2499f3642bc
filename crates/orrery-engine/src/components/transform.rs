// components/transform.rs
//
// Local transform of a scene node relative to its parent.
// World matrices are composed by SceneGraph::world_matrix.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Translation, XYZ Euler rotation (radians) and scale relative to the parent node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local-to-parent matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_by_default() {
        assert_eq!(Transform::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn quarter_turn_about_x_lays_xy_plane_flat() {
        let t = Transform::new().with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        // Local +Y maps onto world +Z, so a ring drawn in XY ends up in XZ.
        let p = t.matrix().transform_point3(Vec3::Y);
        assert!(p.y.abs() < 1e-6);
        assert!((p.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn translation_applies_after_rotation() {
        let t = Transform::new()
            .with_translation(Vec3::new(10.0, 0.0, 0.0))
            .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p.x - 10.0).abs() < 1e-5);
        assert!((p.z + 1.0).abs() < 1e-5);
    }
}
