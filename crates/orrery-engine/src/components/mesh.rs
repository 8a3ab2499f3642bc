use glam::Vec3;

/// Linear RGB color, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Pack back into `0xRRGGBB`.
    pub fn hex(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// CSS hex string, e.g. `#3498db`.
    pub fn css(&self) -> String {
        format!("#{:06x}", self.hex())
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Geometry primitive for a mesh node.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Sphere centered on the node origin.
    Sphere { radius: f32 },
    /// Flat annulus in the node's local XY plane.
    Ring { inner: f32, outer: f32, segments: u32 },
    /// Point cloud in node-local coordinates.
    Points { positions: Vec<Vec3>, size: f32 },
}

impl Shape {
    pub fn sphere(radius: f32) -> Self {
        Shape::Sphere { radius }
    }

    pub fn ring(inner: f32, outer: f32, segments: u32) -> Self {
        Shape::Ring { inner, outer, segments }
    }
}

/// Which faces of a surface are drawn (and hit by rays).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Double,
}

/// Surface appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    /// 1.0 = opaque.
    pub opacity: f32,
    pub transparent: bool,
    /// Unlit surfaces ignore scene lighting (sun, glow, guides).
    pub unlit: bool,
    pub side: Side,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            transparent: false,
            unlit: false,
            side: Side::Front,
        }
    }
}

impl Material {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn unlit(mut self) -> Self {
        self.unlit = true;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = opacity < 1.0;
        self
    }

    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.side = Side::Double;
        self
    }
}

/// Renderable geometry attached to a node.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub shape: Shape,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_css() {
        let earth = Color::from_hex(0x3498db);
        assert_eq!(earth.hex(), 0x3498db);
        assert_eq!(earth.css(), "#3498db");
    }

    #[test]
    fn css_pads_leading_zeros() {
        assert_eq!(Color::from_hex(0x0000ff).css(), "#0000ff");
    }

    #[test]
    fn partial_opacity_marks_transparent() {
        let m = Material::new(Color::WHITE).with_opacity(0.2);
        assert!(m.transparent);
        assert!((m.opacity - 0.2).abs() < 1e-6);
    }
}
