/// Shared frame buffer layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 32 floats (view, projection; column-major)]
/// [Instances: max_instances × 28 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The host reads them from the header to compute offsets dynamically.

use glam::Vec2;
use crate::api::config::SessionConfig;
use crate::api::types::SessionEvent;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::{DrawList, MeshInstance};
use crate::systems::lighting::LightState;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_TRANSPARENT_SPLIT: usize = 4;
pub const HEADER_MAX_EVENTS: usize = 5;
pub const HEADER_EVENT_COUNT: usize = 6;
pub const HEADER_SELECTED: usize = 7;
pub const HEADER_MULTIPLIER: usize = 8;
pub const HEADER_VIEWPORT_WIDTH: usize = 9;
pub const HEADER_VIEWPORT_HEIGHT: usize = 10;
pub const HEADER_AMBIENT_R: usize = 11;
pub const HEADER_AMBIENT_G: usize = 12;
pub const HEADER_AMBIENT_B: usize = 13;
pub const HEADER_LIGHT_INTENSITY: usize = 14;
pub const HEADER_POINT_COUNT: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per mesh instance (wire format, fixed).
pub const INSTANCE_FLOATS: usize = MeshInstance::FLOATS;

/// Floats per session event: kind, a, b, c (wire format, fixed).
pub const EVENT_FLOATS: usize = SessionEvent::FLOATS;

/// Floats in the camera block.
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum mesh instances per frame.
    pub max_instances: usize,
    /// Maximum session events per frame.
    pub max_events: usize,

    /// Offset (in floats) where the camera block begins.
    pub camera_offset: usize,
    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_events: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = camera_offset + CAMERA_FLOATS;
        let event_data_offset = instance_data_offset + instance_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_instances,
            max_events,
            camera_offset,
            instance_data_floats,
            instance_data_offset,
            event_data_floats,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a SessionConfig.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.max_instances, config.max_events)
    }

    /// A zeroed buffer of the right size.
    pub fn alloc(&self) -> Vec<f32> {
        vec![0.0; self.buffer_total_floats]
    }
}

/// Session state that goes into one frame.
pub struct FrameSnapshot<'a> {
    pub frame: u64,
    pub draw_list: &'a DrawList,
    pub events: &'a [SessionEvent],
    pub selected: Option<usize>,
    pub multiplier: f64,
    pub viewport: Vec2,
    pub lighting: &'a LightState,
}

/// Serialize a frame into `buf`. Instances and events beyond capacity are
/// dropped with a warning. `buf` must be `layout.buffer_total_floats` long.
pub fn write_frame(layout: &ProtocolLayout, snapshot: &FrameSnapshot, buf: &mut [f32]) {
    if buf.len() < layout.buffer_total_floats {
        log::warn!(
            "frame buffer too small: {} < {}",
            buf.len(),
            layout.buffer_total_floats
        );
        return;
    }

    let instances = &snapshot.draw_list.instances;
    let instance_count = instances.len().min(layout.max_instances);
    if instance_count < instances.len() {
        log::warn!("dropping {} instances over capacity", instances.len() - instance_count);
    }
    let event_count = snapshot.events.len().min(layout.max_events);
    if event_count < snapshot.events.len() {
        log::warn!("dropping {} events over capacity", snapshot.events.len() - event_count);
    }

    let point_count = snapshot.draw_list.point_positions.len() / 3;
    let ambient = snapshot.lighting.ambient();
    let light_intensity = snapshot.lighting.primary().map(|l| l.intensity).unwrap_or(0.0);

    let header = &mut buf[..HEADER_FLOATS];
    header[HEADER_FRAME_COUNTER] = snapshot.frame as f32;
    header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    header[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
    header[HEADER_INSTANCE_COUNT] = instance_count as f32;
    header[HEADER_TRANSPARENT_SPLIT] =
        (snapshot.draw_list.transparent_split as usize).min(instance_count) as f32;
    header[HEADER_MAX_EVENTS] = layout.max_events as f32;
    header[HEADER_EVENT_COUNT] = event_count as f32;
    header[HEADER_SELECTED] = snapshot.selected.map(|i| i as f32).unwrap_or(-1.0);
    header[HEADER_MULTIPLIER] = snapshot.multiplier as f32;
    header[HEADER_VIEWPORT_WIDTH] = snapshot.viewport.x;
    header[HEADER_VIEWPORT_HEIGHT] = snapshot.viewport.y;
    header[HEADER_AMBIENT_R] = ambient.r;
    header[HEADER_AMBIENT_G] = ambient.g;
    header[HEADER_AMBIENT_B] = ambient.b;
    header[HEADER_LIGHT_INTENSITY] = light_intensity;
    header[HEADER_POINT_COUNT] = point_count as f32;

    let camera: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&snapshot.draw_list.camera));
    buf[layout.camera_offset..layout.camera_offset + CAMERA_FLOATS].copy_from_slice(camera);

    let instance_floats: &[f32] = bytemuck::cast_slice(&instances[..instance_count]);
    let start = layout.instance_data_offset;
    buf[start..start + instance_floats.len()].copy_from_slice(instance_floats);

    let event_floats: &[f32] = bytemuck::cast_slice(&snapshot.events[..event_count]);
    let start = layout.event_data_offset;
    buf[start..start + event_floats.len()].copy_from_slice(event_floats);
}
