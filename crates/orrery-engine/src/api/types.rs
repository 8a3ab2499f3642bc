use bytemuck::{Pod, Zeroable};

/// Unique identifier for a node in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// A session event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SessionEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SessionEvent {
    pub const FLOATS: usize = 4;

    /// Selection changed. `a` = planet index (-1 when cleared), `b` = orbital distance.
    pub const SELECTION: f32 = 1.0;
    /// Speed multiplier changed. `a` = new multiplier, `b` = 1.0 if the clamp engaged.
    pub const SPEED: f32 = 2.0;
    /// Camera view was reset to the default framing.
    pub const VIEW_RESET: f32 = 3.0;

    pub fn selection(index: Option<usize>, distance: f32) -> Self {
        Self {
            kind: Self::SELECTION,
            a: index.map(|i| i as f32).unwrap_or(-1.0),
            b: distance,
            c: 0.0,
        }
    }

    pub fn speed(multiplier: f64, clamped: bool) -> Self {
        Self {
            kind: Self::SPEED,
            a: multiplier as f32,
            b: if clamped { 1.0 } else { 0.0 },
            c: 0.0,
        }
    }

    pub fn view_reset() -> Self {
        Self {
            kind: Self::VIEW_RESET,
            ..Self::default()
        }
    }
}
