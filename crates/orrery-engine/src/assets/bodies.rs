use crate::components::mesh::Color;

/// Static description of one orbiting body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDescriptor {
    pub name: &'static str,
    /// Packed `0xRRGGBB`.
    pub color: u32,
    pub radius: f32,
    /// Distance from the sun in scene units ("million km" in the panel).
    pub orbital_distance: f32,
    /// Radians advanced per rendered frame at multiplier 1.
    pub angular_speed: f64,
    pub description: &'static str,
    /// Adds a flat ring child around the planet.
    pub has_rings: bool,
}

impl BodyDescriptor {
    pub fn color(&self) -> Color {
        Color::from_hex(self.color)
    }
}

/// The central star and its translucent glow shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunDescriptor {
    pub name: &'static str,
    pub color: u32,
    pub radius: f32,
    pub glow_color: u32,
    pub glow_radius: f32,
    pub glow_opacity: f32,
}

pub const SUN: SunDescriptor = SunDescriptor {
    name: "Sun",
    color: 0xffff00,
    radius: 10.0,
    glow_color: 0xffaa00,
    glow_radius: 12.0,
    glow_opacity: 0.5,
};

// ── Ring geometry ───────────────────────────────────────────────────────

/// Half-width of an orbit guide around its orbital distance.
pub const ORBIT_GUIDE_HALF_WIDTH: f32 = 0.3;
pub const ORBIT_GUIDE_SEGMENTS: u32 = 64;
pub const ORBIT_GUIDE_OPACITY: f32 = 0.2;

pub const PLANET_RING_INNER: f32 = 4.0;
pub const PLANET_RING_OUTER: f32 = 6.0;
pub const PLANET_RING_SEGMENTS: u32 = 32;
pub const PLANET_RING_COLOR: u32 = 0xe5e5e5;
pub const PLANET_RING_OPACITY: f32 = 0.8;

/// Mercury through Neptune, innermost first.
pub const PLANETS: [BodyDescriptor; 8] = [
    BodyDescriptor {
        name: "Mercury",
        color: 0x8c8c8c,
        radius: 0.8,
        orbital_distance: 28.0,
        angular_speed: 0.04,
        description: "Closest to the Sun, Mercury is only slightly larger than Earth's Moon.",
        has_rings: false,
    },
    BodyDescriptor {
        name: "Venus",
        color: 0xe6c229,
        radius: 1.5,
        orbital_distance: 44.0,
        angular_speed: 0.015,
        description: "Similar in size to Earth, Venus is the hottest planet with a toxic atmosphere.",
        has_rings: false,
    },
    BodyDescriptor {
        name: "Earth",
        color: 0x3498db,
        radius: 1.6,
        orbital_distance: 62.0,
        angular_speed: 0.01,
        description: "Our home planet is the only known place in the universe confirmed to host life.",
        has_rings: false,
    },
    BodyDescriptor {
        name: "Mars",
        color: 0xc1440e,
        radius: 1.2,
        orbital_distance: 78.0,
        angular_speed: 0.008,
        description: "The Red Planet is home to the tallest mountain in the solar system.",
        has_rings: false,
    },
    BodyDescriptor {
        name: "Jupiter",
        color: 0xd8b08c,
        radius: 3.5,
        orbital_distance: 100.0,
        angular_speed: 0.002,
        description: "The largest planet in our solar system, a gas giant with a Great Red Spot.",
        has_rings: false,
    },
    BodyDescriptor {
        name: "Saturn",
        color: 0xf5e7b2,
        radius: 3.0,
        orbital_distance: 130.0,
        angular_speed: 0.0009,
        description: "Famous for its beautiful rings made of ice and rock particles.",
        has_rings: true,
    },
    BodyDescriptor {
        name: "Uranus",
        color: 0x7bcff1,
        radius: 2.5,
        orbital_distance: 160.0,
        angular_speed: 0.0004,
        description: "An ice giant that rotates on its side with a unique blue-green color.",
        has_rings: false,
    },
    BodyDescriptor {
        name: "Neptune",
        color: 0x5b5bff,
        radius: 2.4,
        orbital_distance: 180.0,
        angular_speed: 0.0001,
        description: "The windiest planet with the strongest winds in the solar system.",
        has_rings: false,
    },
];
