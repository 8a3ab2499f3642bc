use crate::components::mesh::{Shape, Side};
use crate::components::node::Node;
use crate::core::scene::SceneGraph;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::instance::{DrawList, MeshInstance};
use crate::renderer::traits::RenderBackend;

/// Build the draw list from the scene graph.
/// Groups meshes by blending: opaque first, then transparent.
/// Sets `transparent_split` at the boundary.
pub fn build_draw_list(scene: &SceneGraph, camera: &PerspectiveCamera, list: &mut DrawList) {
    list.clear();
    list.camera = camera.uniform();

    let collect_points = list.point_positions.is_empty();
    let mut opaque: Vec<MeshInstance> = Vec::new();
    let mut transparent: Vec<MeshInstance> = Vec::new();

    for node in scene.iter() {
        if !scene.is_visible(node.id) {
            continue;
        }
        let Some(instance) = mesh_instance(scene, node) else {
            continue;
        };

        if collect_points {
            if let Some(mesh) = &node.mesh {
                if let Shape::Points { positions, .. } = &mesh.shape {
                    list.point_positions.extend(positions.iter().flat_map(|p| p.to_array()));
                }
            }
        }

        if instance.has_flag(MeshInstance::FLAG_TRANSPARENT) {
            transparent.push(instance);
        } else {
            opaque.push(instance);
        }
    }

    let split = opaque.len() as u32;
    for inst in opaque {
        list.push(inst);
    }
    list.set_transparent_split(split);
    for inst in transparent {
        list.push(inst);
    }
}

fn mesh_instance(scene: &SceneGraph, node: &Node) -> Option<MeshInstance> {
    let mesh = node.mesh.as_ref()?;
    let material = &mesh.material;

    let (shape_kind, p0, p1, p2) = match &mesh.shape {
        Shape::Sphere { radius } => (MeshInstance::SHAPE_SPHERE, *radius, 0.0, 0.0),
        Shape::Ring { inner, outer, segments } => {
            (MeshInstance::SHAPE_RING, *inner, *outer, *segments as f32)
        }
        Shape::Points { positions, size } => {
            (MeshInstance::SHAPE_POINTS, *size, positions.len() as f32, 0.0)
        }
    };

    let mut flags = 0;
    if material.transparent {
        flags |= MeshInstance::FLAG_TRANSPARENT;
    }
    if material.side == Side::Double {
        flags |= MeshInstance::FLAG_DOUBLE_SIDED;
    }
    if material.unlit {
        flags |= MeshInstance::FLAG_UNLIT;
    }

    Some(MeshInstance {
        model: scene.world_matrix(node.id).to_cols_array_2d(),
        r: material.color.r,
        g: material.color.g,
        b: material.color.b,
        opacity: material.opacity,
        shape_kind,
        flags: flags as f32,
        p0,
        p1,
        p2,
        _pad: [0.0; 3],
    })
}

impl RenderBackend for DrawList {
    fn backend(&self) -> &'static str {
        "draw-list"
    }

    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) {
        build_draw_list(scene, camera, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Color, Material, MeshComponent};
    use glam::Vec3;

    fn sphere(scene: &mut SceneGraph, pos: Vec3, material: Material) -> crate::api::types::NodeId {
        let id = scene.next_id();
        scene.spawn(
            Node::new(id)
                .with_position(pos)
                .with_mesh(MeshComponent::new(Shape::sphere(1.0), material)),
        )
    }

    #[test]
    fn groups_opaque_before_transparent() {
        let mut scene = SceneGraph::new();
        sphere(&mut scene, Vec3::ZERO, Material::new(Color::WHITE).with_opacity(0.5));
        sphere(&mut scene, Vec3::X, Material::new(Color::WHITE));
        sphere(&mut scene, Vec3::Y, Material::new(Color::WHITE));

        let mut list = DrawList::new();
        build_draw_list(&scene, &PerspectiveCamera::default(), &mut list);

        assert_eq!(list.instance_count(), 3);
        assert_eq!(list.transparent_split, 2);
        assert!(list.instances[2].has_flag(MeshInstance::FLAG_TRANSPARENT));
    }

    #[test]
    fn hidden_and_meshless_nodes_are_skipped() {
        let mut scene = SceneGraph::new();
        let hidden = sphere(&mut scene, Vec3::ZERO, Material::default());
        scene.get_mut(hidden).unwrap().visible = false;
        let group = scene.next_id();
        scene.spawn(Node::new(group));

        let mut list = DrawList::new();
        build_draw_list(&scene, &PerspectiveCamera::default(), &mut list);
        assert_eq!(list.instance_count(), 0);
    }

    #[test]
    fn child_instance_uses_world_matrix() {
        let mut scene = SceneGraph::new();
        let parent = sphere(&mut scene, Vec3::new(100.0, 0.0, 0.0), Material::default());
        let ring = scene.next_id();
        scene.spawn_child(
            parent,
            Node::new(ring).with_mesh(MeshComponent::new(
                Shape::ring(4.0, 6.0, 32),
                Material::new(Color::from_hex(0xe5e5e5)).double_sided(),
            )),
        );

        let mut list = DrawList::new();
        list.render(&scene, &PerspectiveCamera::default());

        let ring_inst = list
            .instances
            .iter()
            .find(|i| i.shape_kind == MeshInstance::SHAPE_RING)
            .expect("ring instance");
        assert!((ring_inst.translation() - Vec3::new(100.0, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(ring_inst.p2, 32.0);
        assert!(ring_inst.has_flag(MeshInstance::FLAG_DOUBLE_SIDED));
    }

    #[test]
    fn point_positions_collected_once() {
        let mut scene = SceneGraph::new();
        let id = scene.next_id();
        scene.spawn(Node::new(id).with_mesh(MeshComponent::new(
            Shape::Points { positions: vec![Vec3::ONE, Vec3::NEG_ONE], size: 0.1 },
            Material::default().transparent(),
        )));

        let mut list = DrawList::new();
        list.render(&scene, &PerspectiveCamera::default());
        list.render(&scene, &PerspectiveCamera::default());
        assert_eq!(list.point_positions.len(), 6);
        assert_eq!(list.instances[0].p1, 2.0);
    }
}
