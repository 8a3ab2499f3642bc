/// UI commands issued by the host's control buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Multiply the orbital speed multiplier by the speed step.
    SpeedUp,
    /// Divide the orbital speed multiplier by the speed step.
    SlowDown,
    /// Restore speed, camera and panel to their initial state.
    ResetView,
}

impl Command {
    /// Decode the numeric code the host sends (1, 2, 3).
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Command::SpeedUp),
            2 => Some(Command::SlowDown),
            3 => Some(Command::ResetView),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Command::SpeedUp => 1,
            Command::SlowDown => 2,
            Command::ResetView => 3,
        }
    }
}

/// Input event types the session understands.
/// Pointer coordinates are canvas pixels with the origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A primary button press began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The primary button was released at (x, y).
    PointerUp { x: f32, y: f32 },
    /// A click landed at (x, y).
    Click { x: f32, y: f32 },
    /// Mouse wheel; positive `delta_y` zooms out.
    Wheel { delta_y: f32 },
    /// A control button was pressed.
    Command(Command),
    /// The canvas was resized to `width` x `height` pixels.
    Resize { width: u32, height: u32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
