use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use super::camera::CameraUniform;

/// Per-mesh render data written to the shared frame buffer for the host renderer.
/// Must match the host protocol: 28 floats = 112 bytes stride.
///
/// Shape parameters by `shape_kind`:
/// - sphere: `p0` = radius
/// - ring:   `p0` = inner radius, `p1` = outer radius, `p2` = segments
/// - points: `p0` = point size, `p1` = point count (positions live in the star buffer)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct MeshInstance {
    /// World matrix, column-major.
    pub model: [[f32; 4]; 4],
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub opacity: f32,
    pub shape_kind: f32,
    /// Bit flags, see `FLAG_*`.
    pub flags: f32,
    pub p0: f32,
    pub p1: f32,
    pub p2: f32,
    pub _pad: [f32; 3],
}

impl MeshInstance {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const SHAPE_SPHERE: f32 = 0.0;
    pub const SHAPE_RING: f32 = 1.0;
    pub const SHAPE_POINTS: f32 = 2.0;

    pub const FLAG_TRANSPARENT: u32 = 1;
    pub const FLAG_DOUBLE_SIDED: u32 = 2;
    pub const FLAG_UNLIT: u32 = 4;

    /// World-space origin of the instance.
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.model[3][0], self.model[3][1], self.model[3][2])
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags as u32) & flag != 0
    }
}

/// Everything the host needs to draw one frame.
pub struct DrawList {
    /// One record per visible mesh node: opaque first, then transparent.
    pub instances: Vec<MeshInstance>,
    /// Instances [0..transparent_split) are opaque, the rest are blended.
    pub transparent_split: u32,
    pub camera: CameraUniform,
    /// Flattened xyz positions of every point cloud, in instance order.
    /// Static for the session, so the host uploads it once.
    pub point_positions: Vec<f32>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(32),
            transparent_split: 0,
            camera: CameraUniform::default(),
            point_positions: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.transparent_split = 0;
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn set_transparent_split(&mut self, split: u32) {
        self.transparent_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for shared-memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data reinterpreted as floats.
    pub fn instance_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_instance_is_28_floats() {
        assert_eq!(std::mem::size_of::<MeshInstance>(), MeshInstance::STRIDE_BYTES);
        assert_eq!(MeshInstance::FLOATS, 28);
    }

    #[test]
    fn draw_list_push_and_count() {
        let mut list = DrawList::new();
        list.push(MeshInstance::default());
        list.push(MeshInstance::default());
        assert_eq!(list.instance_count(), 2);
        assert_eq!(list.instance_floats().len(), 56);
        list.clear();
        assert_eq!(list.instance_count(), 0);
    }

    #[test]
    fn flags_decode() {
        let inst = MeshInstance {
            flags: (MeshInstance::FLAG_TRANSPARENT | MeshInstance::FLAG_UNLIT) as f32,
            ..Default::default()
        };
        assert!(inst.has_flag(MeshInstance::FLAG_TRANSPARENT));
        assert!(!inst.has_flag(MeshInstance::FLAG_DOUBLE_SIDED));
    }
}
