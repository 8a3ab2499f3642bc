// systems/picking.rs
//
// Pointer picking: canvas pixels -> NDC -> camera ray -> nearest mesh hit ->
// the planet that owns it. Intersection is analytic per shape kind.

use glam::{Vec2, Vec3};
use crate::api::types::NodeId;
use crate::components::mesh::{Shape, Side};
use crate::core::scene::SceneGraph;
use crate::renderer::camera::PerspectiveCamera;
use super::orbit::OrbitalState;

/// Half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// `direction` is normalized here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// One ray/mesh intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    /// Distance from the ray origin in world units.
    pub distance: f32,
    pub point: Vec3,
}

/// Capability to intersect a ray with every mesh in a scene.
pub trait Intersector {
    /// All hits, nearest first. Children are included.
    fn intersect(&self, ray: &Ray, scene: &SceneGraph) -> Vec<Hit>;
}

/// Analytic raycaster over spheres, rings and point clouds.
#[derive(Debug, Clone)]
pub struct SceneRaycaster {
    /// A point counts as hit when the ray passes within this distance.
    pub points_threshold: f32,
}

impl SceneRaycaster {
    pub fn new(points_threshold: f32) -> Self {
        Self { points_threshold }
    }
}

impl Default for SceneRaycaster {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Intersector for SceneRaycaster {
    fn intersect(&self, ray: &Ray, scene: &SceneGraph) -> Vec<Hit> {
        let mut hits = Vec::new();

        for node in scene.iter() {
            let Some(mesh) = &node.mesh else { continue };
            if !scene.is_visible(node.id) {
                continue;
            }
            let world = scene.world_matrix(node.id);
            let side = mesh.material.side;

            let t = match &mesh.shape {
                Shape::Sphere { radius } => {
                    let (scale, _, center) = world.to_scale_rotation_translation();
                    intersect_sphere(ray, center, radius * scale.max_element(), side)
                }
                Shape::Ring { inner, outer, .. } => {
                    let local = world.inverse();
                    let origin = local.transform_point3(ray.origin);
                    let direction = local.transform_vector3(ray.direction);
                    intersect_ring(origin, direction, *inner, *outer, side)
                        .map(|local_t| world.transform_point3(origin + direction * local_t))
                        .map(|p| p.distance(ray.origin))
                }
                Shape::Points { positions, .. } => positions
                    .iter()
                    .filter_map(|p| {
                        intersect_point(ray, world.transform_point3(*p), self.points_threshold)
                    })
                    .min_by(|a, b| a.total_cmp(b)),
            };

            if let Some(distance) = t {
                hits.push(Hit {
                    node: node.id,
                    distance,
                    point: ray.at(distance),
                });
            }
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

/// Nearest positive hit distance on a sphere. Front-sided spheres are not
/// hit from inside.
fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32, side: Side) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let near = -b - root;
    if near > 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (side == Side::Double && far > 0.0).then_some(far)
}

/// Ray parameter where a local-space ray crosses the annulus in the z = 0 plane.
/// The front face looks down +Z.
fn intersect_ring(origin: Vec3, direction: Vec3, inner: f32, outer: f32, side: Side) -> Option<f32> {
    if direction.z.abs() < 1e-9 {
        return None;
    }
    if side == Side::Front && direction.z > 0.0 {
        return None;
    }
    let t = -origin.z / direction.z;
    if t <= 0.0 {
        return None;
    }
    let p = origin + direction * t;
    let r = Vec2::new(p.x, p.y).length();
    (r >= inner && r <= outer).then_some(t)
}

/// Distance along the ray to its closest approach to `point`, if within `threshold`.
fn intersect_point(ray: &Ray, point: Vec3, threshold: f32) -> Option<f32> {
    let t = (point - ray.origin).dot(ray.direction);
    if t <= 0.0 {
        return None;
    }
    (ray.at(t).distance_squared(point) < threshold * threshold).then_some(t)
}

/// Canvas pixels (origin top-left) to normalized device coordinates (+Y up).
pub fn pointer_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

/// Map the nearest hit to the planet that owns it: either the planet's own
/// node or a direct child of it (such as a ring).
pub fn resolve(hits: &[Hit], states: &[OrbitalState], scene: &SceneGraph) -> Option<usize> {
    let nearest = hits.first()?;
    states
        .iter()
        .position(|s| s.node == nearest.node || scene.is_child_of(nearest.node, s.node))
}

/// Full pick from canvas pixels. Degenerate viewports never hit.
pub fn pick(
    pointer: Vec2,
    viewport: Vec2,
    camera: &PerspectiveCamera,
    scene: &SceneGraph,
    states: &[OrbitalState],
    intersector: &dyn Intersector,
) -> Option<usize> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    let ndc = pointer_to_ndc(pointer.x, pointer.y, viewport.x, viewport.y);
    let ray = camera.ray_from_ndc(ndc.x, ndc.y);
    let hits = intersector.intersect(&ray, scene);
    resolve(&hits, states, scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;
    use crate::assets::bodies::PLANETS;
    use crate::components::mesh::{Color, Material, MeshComponent};
    use crate::components::node::Node;
    use crate::systems::orbit::place;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    /// Sun, Earth at angle 0 and Saturn with its ring at angle 0, plus one star.
    fn scene() -> (SceneGraph, Vec<OrbitalState>, NodeId) {
        let mut scene = SceneGraph::new();

        let sun = scene.next_id();
        scene.spawn(
            Node::new(sun)
                .with_name("Sun")
                .with_mesh(MeshComponent::new(Shape::sphere(10.0), Material::new(Color::from_hex(0xffff00)))),
        );

        let mut states = Vec::new();
        for body in [&PLANETS[2], &PLANETS[5]] {
            let id = scene.next_id();
            scene.spawn(
                Node::new(id)
                    .with_name(body.name)
                    .with_mesh(MeshComponent::new(Shape::sphere(body.radius), Material::new(body.color()))),
            );
            if body.has_rings {
                let ring = scene.next_id();
                scene.spawn_child(
                    id,
                    Node::new(ring)
                        .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
                        .with_mesh(MeshComponent::new(
                            Shape::ring(4.0, 6.0, 32),
                            Material::new(Color::from_hex(0xe5e5e5)).with_opacity(0.8).double_sided(),
                        )),
                );
            }
            let state = OrbitalState::new(id, body, 0.0);
            place(&state, &mut scene);
            states.push(state);
        }

        let star = scene.next_id();
        scene.spawn(Node::new(star).with_mesh(MeshComponent::new(
            Shape::Points { positions: vec![Vec3::new(-300.0, 20.0, -400.0)], size: 0.1 },
            Material::default().transparent(),
        )));

        (scene, states, star)
    }

    fn pixel_of(camera: &PerspectiveCamera, world: Vec3) -> Vec2 {
        let ndc = camera.project_to_ndc(world);
        Vec2::new((ndc.x + 1.0) / 2.0 * VIEWPORT.x, (1.0 - ndc.y) / 2.0 * VIEWPORT.y)
    }

    fn camera() -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::default();
        cam.set_viewport(VIEWPORT.x, VIEWPORT.y);
        cam
    }

    #[test]
    fn ndc_inverts_y() {
        let ndc = pointer_to_ndc(0.0, 0.0, 800.0, 600.0);
        assert_eq!(ndc, Vec2::new(-1.0, 1.0));
        let ndc = pointer_to_ndc(400.0, 300.0, 800.0, 600.0);
        assert_eq!(ndc, Vec2::ZERO);
        let ndc = pointer_to_ndc(800.0, 600.0, 800.0, 600.0);
        assert_eq!(ndc, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn click_on_planet_resolves_it() {
        let (scene, states, _) = scene();
        let cam = camera();
        let pointer = pixel_of(&cam, states[0].position());
        let picked = pick(pointer, VIEWPORT, &cam, &scene, &states, &SceneRaycaster::default());
        assert_eq!(picked, Some(0));
    }

    #[test]
    fn click_on_ring_resolves_parent_planet() {
        let (scene, states, _) = scene();
        // Look straight down at Saturn so the ray crosses only the ring.
        let cam = PerspectiveCamera::new(75.0, VIEWPORT.x / VIEWPORT.y, 0.1, 1000.0)
            .with_position(Vec3::new(130.0, 60.0, 30.0))
            .with_target(Vec3::new(130.0, 0.0, 0.0));
        let ring_point = Vec3::new(135.5, 0.0, 0.0);
        let pointer = pixel_of(&cam, ring_point);

        let ndc = pointer_to_ndc(pointer.x, pointer.y, VIEWPORT.x, VIEWPORT.y);
        let hits = SceneRaycaster::default().intersect(&cam.ray_from_ndc(ndc.x, ndc.y), &scene);
        let saturn = scene.get(states[1].node).unwrap();
        assert_eq!(hits.first().map(|h| h.node), saturn.children().first().copied());

        let picked = pick(pointer, VIEWPORT, &cam, &scene, &states, &SceneRaycaster::default());
        assert_eq!(picked, Some(1));
    }

    #[test]
    fn empty_space_resolves_none() {
        let (scene, states, _) = scene();
        let cam = camera();
        // Top-left corner looks up into the void.
        let picked = pick(Vec2::new(1.0, 1.0), VIEWPORT, &cam, &scene, &states, &SceneRaycaster::default());
        assert_eq!(picked, None);
    }

    #[test]
    fn star_hit_resolves_none() {
        let (scene, states, star) = scene();
        let cam = camera();
        let pointer = pixel_of(&cam, Vec3::new(-300.0, 20.0, -400.0));

        let ndc = pointer_to_ndc(pointer.x, pointer.y, VIEWPORT.x, VIEWPORT.y);
        let hits = SceneRaycaster::default().intersect(&cam.ray_from_ndc(ndc.x, ndc.y), &scene);
        assert_eq!(hits.first().map(|h| h.node), Some(star));

        let picked = pick(pointer, VIEWPORT, &cam, &scene, &states, &SceneRaycaster::default());
        assert_eq!(picked, None);
    }

    #[test]
    fn sun_hit_resolves_none() {
        let (scene, states, _) = scene();
        let cam = camera();
        let pointer = Vec2::new(VIEWPORT.x / 2.0, VIEWPORT.y / 2.0);
        let picked = pick(pointer, VIEWPORT, &cam, &scene, &states, &SceneRaycaster::default());
        assert_eq!(picked, None);
    }

    #[test]
    fn hits_are_sorted_nearest_first() {
        let (scene, _, _) = scene();
        // Ray along +X from far left passes through the sun then Earth.
        let ray = Ray::new(Vec3::new(-500.0, 0.0, 0.0), Vec3::X);
        let hits = SceneRaycaster::default().intersect(&ray, &scene);
        assert!(hits.len() >= 2);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert!((hits[0].distance - 490.0).abs() < 1e-3);
    }

    #[test]
    fn front_sided_sphere_not_hit_from_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(intersect_sphere(&ray, Vec3::ZERO, 5.0, Side::Front), None);
        assert_eq!(intersect_sphere(&ray, Vec3::ZERO, 5.0, Side::Double), Some(5.0));
    }

    #[test]
    fn degenerate_viewport_never_hits() {
        let (scene, states, _) = scene();
        let picked = pick(Vec2::ZERO, Vec2::ZERO, &camera(), &scene, &states, &SceneRaycaster::default());
        assert_eq!(picked, None);
    }
}
