//! Scene lighting: one ambient term plus persistent point lights.
//!
//! Lights stay until explicitly removed. Each frame the bridge copies the
//! ambient color and the first light into the frame header for the host renderer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::Color;

/// A point light with position, color and intensity.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, _pad]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    pub _pad: f32,
}

impl PointLight {
    pub const FLOATS: usize = 8;

    pub fn new(pos: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            _pad: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Ambient color and active lights for the scene.
///
/// The ambient color defaults to white, which renders lit materials unshaded
/// when no lights are present.
#[derive(Debug, Clone)]
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: Color,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: Color::WHITE,
        }
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    /// The light the host treats as the key light (the sun).
    pub fn primary(&self) -> Option<&PointLight> {
        self.lights.first()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, color: Color) {
        self.ambient = color;
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
