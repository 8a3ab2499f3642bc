use glam::Mat4;
use crate::api::types::NodeId;
use crate::components::node::Node;
use crate::systems::lighting::LightState;

/// Scene graph stored as a flat Vec with parent/child links.
/// Designed for small node counts (dozens, not thousands).
pub struct SceneGraph {
    nodes: Vec<Node>,
    next_id: u32,
    pub lighting: LightState,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(32),
            next_id: 1,
            lighting: LightState::new(),
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a top-level node. Returns its ID.
    pub fn spawn(&mut self, mut node: Node) -> NodeId {
        let id = node.id;
        node.parent = None;
        self.nodes.push(node);
        id
    }

    /// Add a node as a child of `parent`. The child's transform is relative to the parent.
    /// Falls back to a top-level node if the parent does not exist.
    pub fn spawn_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = node.id;
        match self.get_mut(parent) {
            Some(p) => {
                p.children.push(id);
                node.parent = Some(parent);
            }
            None => {
                log::warn!("spawn_child: parent {:?} missing, adding {:?} as root", parent, id);
                node.parent = None;
            }
        }
        self.nodes.push(node);
        id
    }

    /// Remove a node and all its descendants.
    pub fn despawn(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.swap_remove(idx);
        if let Some(parent) = node.parent.and_then(|p| self.get_mut(p)) {
            parent.children.retain(|&c| c != id);
        }
        for child in node.children.clone() {
            self.despawn(child);
        }
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Top-level nodes, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.parent.is_none())
    }

    /// Find the first node with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Whether `child` is a direct child of `parent`.
    pub fn is_child_of(&self, child: NodeId, parent: NodeId) -> bool {
        self.get(child).and_then(|n| n.parent) == Some(parent)
    }

    /// Compose local transforms from the root down to `id`.
    /// Unknown IDs yield the identity.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut current = self.get(id);
        while let Some(node) = current {
            matrix = node.transform.matrix() * matrix;
            current = node.parent.and_then(|p| self.get(p));
        }
        matrix
    }

    /// Whether the node and every ancestor are visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = self.get(id);
        while let Some(node) = current {
            if !node.visible {
                return false;
            }
            current = node.parent.and_then(|p| self.get(p));
        }
        true
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop all nodes and lights.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lighting.clear();
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
