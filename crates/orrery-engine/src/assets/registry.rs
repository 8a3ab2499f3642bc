use crate::api::error::{OrreryError, Result};
use crate::assets::bodies::{BodyDescriptor, SunDescriptor, PLANETS, SUN};

/// Registry of the bodies a session is built from.
/// Planets are ordered innermost first; the index is the planet's identity
/// in selection events.
#[derive(Debug, Clone)]
pub struct BodyRegistry {
    planets: Vec<BodyDescriptor>,
    sun: SunDescriptor,
}

impl BodyRegistry {
    /// The eight planets of the solar system around the default sun.
    pub fn solar_system() -> Self {
        Self {
            planets: PLANETS.to_vec(),
            sun: SUN,
        }
    }

    /// Build from arbitrary rows. Call `validate` before building a scene.
    pub fn from_parts(sun: SunDescriptor, planets: Vec<BodyDescriptor>) -> Self {
        Self { planets, sun }
    }

    pub fn sun(&self) -> &SunDescriptor {
        &self.sun
    }

    pub fn planets(&self) -> &[BodyDescriptor] {
        &self.planets
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodyDescriptor> {
        self.planets.iter()
    }

    /// Look up a planet by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&BodyDescriptor> {
        self.planets.iter().find(|b| b.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.planets.iter().position(|b| b.name == name)
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    /// Check the table is complete and physically ordered:
    /// every row present, positive sizes, distances strictly increasing
    /// and speeds strictly decreasing outward.
    pub fn validate(&self) -> Result<()> {
        if self.planets.len() != PLANETS.len() {
            return Err(invalid(
                "registry",
                format!("expected {} planets, found {}", PLANETS.len(), self.planets.len()),
            ));
        }
        if self.sun.radius <= 0.0 || self.sun.glow_radius < self.sun.radius {
            return Err(invalid(self.sun.name, "glow must enclose a positive sun radius".into()));
        }

        for body in &self.planets {
            if !(body.radius > 0.0) {
                return Err(invalid(body.name, format!("radius {} must be positive", body.radius)));
            }
            if !(body.orbital_distance > 0.0) {
                return Err(invalid(
                    body.name,
                    format!("orbital distance {} must be positive", body.orbital_distance),
                ));
            }
            if !(body.angular_speed > 0.0) {
                return Err(invalid(
                    body.name,
                    format!("angular speed {} must be positive", body.angular_speed),
                ));
            }
        }

        for pair in self.planets.windows(2) {
            let (inner, outer) = (&pair[0], &pair[1]);
            if outer.orbital_distance <= inner.orbital_distance {
                return Err(invalid(
                    outer.name,
                    format!("orbits inside {} ({} <= {})", inner.name, outer.orbital_distance, inner.orbital_distance),
                ));
            }
            if outer.angular_speed >= inner.angular_speed {
                return Err(invalid(
                    outer.name,
                    format!("not slower than {} ({} >= {})", inner.name, outer.angular_speed, inner.angular_speed),
                ));
            }
        }

        Ok(())
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::solar_system()
    }
}

fn invalid(body: &str, reason: String) -> OrreryError {
    OrreryError::InvalidRegistry {
        body: body.to_string(),
        reason,
    }
}
