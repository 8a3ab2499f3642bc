// systems/scene_builder.rs
//
// One-time construction of the solar system scene: starfield, sun with glow,
// planets with their orbit guides and rings, and lighting.

use std::f32::consts::FRAC_PI_2;
use std::f64::consts::TAU;
use glam::Vec3;
use crate::api::types::NodeId;
use crate::assets::bodies::{
    BodyDescriptor, ORBIT_GUIDE_HALF_WIDTH, ORBIT_GUIDE_OPACITY, ORBIT_GUIDE_SEGMENTS,
    PLANET_RING_COLOR, PLANET_RING_INNER, PLANET_RING_OPACITY, PLANET_RING_OUTER,
    PLANET_RING_SEGMENTS,
};
use crate::assets::registry::BodyRegistry;
use crate::components::mesh::{Color, Material, MeshComponent, Shape};
use crate::components::node::Node;
use crate::core::rng::Rng;
use crate::core::scene::SceneGraph;
use crate::systems::lighting::PointLight;
use super::orbit::{place, OrbitalState};

/// Starfield parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Edge length of the cube the stars fill, centered on the origin.
    pub spread: f32,
    pub size: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 5000,
            spread: 2000.0,
            size: 0.1,
        }
    }
}

/// Output of `build_scene`.
pub struct BuiltScene {
    pub scene: SceneGraph,
    /// One record per registry planet, same order.
    pub planets: Vec<OrbitalState>,
    pub sun: NodeId,
    pub stars: NodeId,
}

/// Build the full scene. Start angles are drawn from `rng`.
pub fn build_scene(registry: &BodyRegistry, stars: &StarfieldConfig, rng: &mut Rng) -> BuiltScene {
    let mut scene = SceneGraph::new();

    let star_node = add_stars(&mut scene, stars, rng);
    let sun = create_sun(&mut scene, registry);
    let planets = create_planets(&mut scene, registry.planets(), rng);
    add_lighting(&mut scene);

    log::info!(
        "scene built: {} nodes, {} planets, {} stars",
        scene.len(),
        planets.len(),
        stars.count
    );

    BuiltScene {
        scene,
        planets,
        sun,
        stars: star_node,
    }
}

// ── Builders ────────────────────────────────────────────────────────────

/// Point cloud uniformly filling a cube of edge `spread` around the origin.
pub fn add_stars(scene: &mut SceneGraph, config: &StarfieldConfig, rng: &mut Rng) -> NodeId {
    let half = config.spread / 2.0;
    let positions: Vec<Vec3> = (0..config.count)
        .map(|_| {
            Vec3::new(
                rng.range_f32(-half, half),
                rng.range_f32(-half, half),
                rng.range_f32(-half, half),
            )
        })
        .collect();

    let id = scene.next_id();
    scene.spawn(
        Node::new(id).with_name("Stars").with_mesh(MeshComponent::new(
            Shape::Points { positions, size: config.size },
            Material::new(Color::WHITE).unlit().transparent(),
        )),
    )
}

/// Emissive sun at the origin with a translucent glow child.
pub fn create_sun(scene: &mut SceneGraph, registry: &BodyRegistry) -> NodeId {
    let sun = registry.sun();

    let id = scene.next_id();
    scene.spawn(
        Node::new(id).with_name(sun.name).with_mesh(MeshComponent::new(
            Shape::sphere(sun.radius),
            Material::new(Color::from_hex(sun.color)).unlit(),
        )),
    );

    let glow = scene.next_id();
    scene.spawn_child(
        id,
        Node::new(glow).with_mesh(MeshComponent::new(
            Shape::sphere(sun.glow_radius),
            Material::new(Color::from_hex(sun.glow_color))
                .unlit()
                .with_opacity(sun.glow_opacity),
        )),
    );

    id
}

/// Planet spheres, orbit guides and rings. Each planet starts at a random angle.
pub fn create_planets(
    scene: &mut SceneGraph,
    bodies: &[BodyDescriptor],
    rng: &mut Rng,
) -> Vec<OrbitalState> {
    let mut states = Vec::with_capacity(bodies.len());

    for body in bodies {
        let id = scene.next_id();
        scene.spawn(
            Node::new(id)
                .with_name(body.name)
                .with_position(Vec3::new(body.orbital_distance, 0.0, 0.0))
                .with_mesh(MeshComponent::new(
                    Shape::sphere(body.radius),
                    Material::new(body.color()),
                )),
        );

        add_orbit_guide(scene, body.orbital_distance);

        if body.has_rings {
            let ring = scene.next_id();
            scene.spawn_child(
                id,
                Node::new(ring)
                    .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
                    .with_mesh(MeshComponent::new(
                        Shape::ring(PLANET_RING_INNER, PLANET_RING_OUTER, PLANET_RING_SEGMENTS),
                        Material::new(Color::from_hex(PLANET_RING_COLOR))
                            .with_opacity(PLANET_RING_OPACITY)
                            .double_sided(),
                    )),
            );
        }

        let state = OrbitalState::new(id, body, rng.next_f64() * TAU);
        place(&state, scene);
        states.push(state);
    }

    states
}

/// Thin flat annulus tracing an orbit, lying in the XZ plane.
fn add_orbit_guide(scene: &mut SceneGraph, distance: f32) -> NodeId {
    let id = scene.next_id();
    scene.spawn(
        Node::new(id)
            .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
            .with_mesh(MeshComponent::new(
                Shape::ring(
                    distance - ORBIT_GUIDE_HALF_WIDTH,
                    distance + ORBIT_GUIDE_HALF_WIDTH,
                    ORBIT_GUIDE_SEGMENTS,
                ),
                Material::new(Color::WHITE)
                    .unlit()
                    .with_opacity(ORBIT_GUIDE_OPACITY)
                    .double_sided(),
            )),
    )
}

/// Dim ambient fill plus a white light at the sun.
pub fn add_lighting(scene: &mut SceneGraph) {
    scene.lighting.set_ambient(Color::from_hex(0x333333));
    scene.lighting.add(PointLight::new(Vec3::ZERO, Color::WHITE, 1.0));
}
