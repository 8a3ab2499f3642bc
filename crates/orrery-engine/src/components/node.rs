use glam::Vec3;
use crate::api::types::NodeId;
use crate::components::mesh::MeshComponent;
use crate::components::transform::Transform;

/// Fat scene node: a transform, an optional mesh, and parent/child links.
/// Nodes without a mesh are invisible groups.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Display name ("Sun", "Earth", ...). Empty for anonymous helpers.
    pub name: String,
    /// Hidden nodes are neither drawn nor hit by picking.
    pub visible: bool,
    /// Transform relative to the parent (or world for roots).
    pub transform: Transform,
    pub mesh: Option<MeshComponent>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// Create a new node with the given ID at the origin.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            name: String::new(),
            visible: true,
            transform: Transform::default(),
            mesh: None,
            parent: None,
            children: Vec::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.translation = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }
}
