// systems/orbit.rs
//
// Per-frame orbital motion. Each planet advances by a fixed angle per
// rendered frame (scaled by the speed multiplier) on a circle in the XZ
// plane, and spins about its own Y axis at a constant rate.

use glam::Vec3;
use crate::api::types::NodeId;
use crate::assets::bodies::BodyDescriptor;
use crate::components::mesh::Color;
use crate::core::scene::SceneGraph;

/// Mutable orbital record for one planet, owned by the session.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalState {
    /// The planet's sphere node.
    pub node: NodeId,
    pub name: &'static str,
    pub color: Color,
    /// Accumulated angle in radians. Never normalized.
    pub angle: f64,
    /// Radians per frame at multiplier 1.
    pub angular_speed: f64,
    pub orbital_distance: f32,
    pub description: &'static str,
}

impl OrbitalState {
    pub fn new(node: NodeId, body: &BodyDescriptor, angle: f64) -> Self {
        Self {
            node,
            name: body.name,
            color: body.color(),
            angle,
            angular_speed: body.angular_speed,
            orbital_distance: body.orbital_distance,
            description: body.description,
        }
    }

    /// World position implied by the current angle.
    pub fn position(&self) -> Vec3 {
        orbit_position(self.angle, self.orbital_distance)
    }
}

/// Point on a circle of radius `distance` in the XZ plane.
/// Computed in f64 so long sessions keep their precision.
pub fn orbit_position(angle: f64, distance: f32) -> Vec3 {
    let d = distance as f64;
    Vec3::new((angle.cos() * d) as f32, 0.0, (angle.sin() * d) as f32)
}

/// Write the state's position into its node.
pub fn place(state: &OrbitalState, scene: &mut SceneGraph) {
    if let Some(node) = scene.get_mut(state.node) {
        node.transform.translation = state.position();
    }
}

/// Advance every planet by one frame.
/// `spin` is the self-rotation per frame and ignores the multiplier.
pub fn advance(states: &mut [OrbitalState], scene: &mut SceneGraph, multiplier: f64, spin: f32) {
    for state in states.iter_mut() {
        state.angle += state.angular_speed * multiplier;
        if let Some(node) = scene.get_mut(state.node) {
            node.transform.translation = state.position();
            node.transform.rotation.y += spin;
        }
    }
}

// ── Speed multiplier ────────────────────────────────────────────────────

/// Global multiplier on every angular speed, kept inside `[min, max]`.
///
/// A step that hits a bound is not remembered: speeding up from 40 with a
/// step of 1.5 lands on 50, and slowing down from there gives 33.3, not 40.
/// Away from the bounds speed-up and slow-down are exact inverses.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedControl {
    multiplier: f64,
    step: f64,
    min: f64,
    max: f64,
}

impl SpeedControl {
    pub fn new(step: f64, min: f64, max: f64) -> Self {
        Self {
            multiplier: 1.0,
            step,
            min,
            max,
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Multiply by the step. Returns true if the upper bound engaged.
    pub fn speed_up(&mut self) -> bool {
        self.set(self.multiplier * self.step)
    }

    /// Divide by the step. Returns true if the lower bound engaged.
    pub fn slow_down(&mut self) -> bool {
        self.set(self.multiplier / self.step)
    }

    pub fn reset(&mut self) {
        self.multiplier = 1.0;
    }

    fn set(&mut self, value: f64) -> bool {
        let clamped = value.clamp(self.min, self.max);
        if clamped != value {
            log::warn!("speed multiplier {:.4} clamped to {}", value, clamped);
        }
        self.multiplier = clamped;
        clamped != value
    }
}

impl Default for SpeedControl {
    fn default() -> Self {
        Self::new(1.5, 0.01, 50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::bodies::PLANETS;
    use crate::components::node::Node;

    fn earth(scene: &mut SceneGraph, angle: f64) -> OrbitalState {
        let id = scene.next_id();
        scene.spawn(Node::new(id).with_name("Earth"));
        let state = OrbitalState::new(id, &PLANETS[2], angle);
        place(&state, scene);
        state
    }

    #[test]
    fn angle_advances_linearly() {
        let mut scene = SceneGraph::new();
        let mut states = vec![earth(&mut scene, 0.25)];
        for _ in 0..250 {
            advance(&mut states, &mut scene, 2.0, 0.01);
        }
        let expected = 0.25 + 250.0 * 0.01 * 2.0;
        assert!((states[0].angle - expected).abs() < 1e-9, "angle {}", states[0].angle);
    }

    #[test]
    fn planet_stays_on_its_circle() {
        let mut scene = SceneGraph::new();
        let mut states: Vec<OrbitalState> = PLANETS
            .iter()
            .enumerate()
            .map(|(i, body)| {
                let id = scene.next_id();
                scene.spawn(Node::new(id).with_name(body.name));
                OrbitalState::new(id, body, i as f64)
            })
            .collect();

        for _ in 0..500 {
            advance(&mut states, &mut scene, 7.5, 0.01);
            for state in &states {
                let p = scene.get(state.node).unwrap().position();
                let r = (p.x * p.x + p.z * p.z).sqrt();
                assert!((r - state.orbital_distance).abs() < 1e-3, "{} at r={}", state.name, r);
                assert_eq!(p.y, 0.0);
            }
        }
    }

    #[test]
    fn earth_after_one_hundred_frames() {
        let mut scene = SceneGraph::new();
        let mut states = vec![earth(&mut scene, 0.0)];
        for _ in 0..100 {
            advance(&mut states, &mut scene, 1.0, 0.01);
        }
        assert!((states[0].angle - 1.0).abs() < 1e-9);
        let p = scene.get(states[0].node).unwrap().position();
        assert!((p.x - 33.4985).abs() < 1e-3, "x = {}", p.x);
        assert!((p.z - 52.1710).abs() < 1e-3, "z = {}", p.z);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn spin_ignores_multiplier() {
        let mut scene = SceneGraph::new();
        let mut states = vec![earth(&mut scene, 0.0)];
        for _ in 0..10 {
            advance(&mut states, &mut scene, 40.0, 0.01);
        }
        let spin = scene.get(states[0].node).unwrap().transform.rotation.y;
        assert!((spin - 0.1).abs() < 1e-5);
    }

    #[test]
    fn speed_up_then_slow_down_restores() {
        let mut speed = SpeedControl::default();
        for _ in 0..3 {
            speed.speed_up();
        }
        for _ in 0..3 {
            speed.slow_down();
        }
        assert!((speed.multiplier() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn multiplier_is_clamped_and_never_reverses() {
        let mut speed = SpeedControl::default();
        let mut engaged = false;
        for _ in 0..50 {
            engaged |= speed.slow_down();
        }
        assert!(engaged);
        assert_eq!(speed.multiplier(), 0.01);

        for _ in 0..100 {
            speed.speed_up();
        }
        assert_eq!(speed.multiplier(), 50.0);

        speed.reset();
        assert_eq!(speed.multiplier(), 1.0);
    }

    #[test]
    fn round_trip_through_upper_bound_is_lossy() {
        let mut speed = SpeedControl::new(2.0, 0.01, 50.0);
        for _ in 0..5 {
            assert!(!speed.speed_up());
        }
        assert_eq!(speed.multiplier(), 32.0);

        assert!(speed.speed_up());
        assert_eq!(speed.multiplier(), 50.0);
        assert!(!speed.slow_down());
        assert_eq!(speed.multiplier(), 25.0);
    }

    #[test]
    fn round_trip_through_lower_bound_is_lossy() {
        let mut speed = SpeedControl::new(4.0, 0.1, 50.0);
        speed.slow_down();
        assert_eq!(speed.multiplier(), 0.25);
        assert!(speed.slow_down());
        assert_eq!(speed.multiplier(), 0.1);
        speed.speed_up();
        assert!((speed.multiplier() - 0.4).abs() < 1e-12);
    }
}
