/// Lifecycle of the per-frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    NotStarted,
    Running,
}

/// Gate and frame counter for the per-frame loop. Once running it stays
/// running until the owning session is torn down.
#[derive(Debug, Default)]
pub struct RenderLoop {
    state: LoopState,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Running`. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.state == LoopState::Running {
            return false;
        }
        self.state = LoopState::Running;
        true
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Count a frame. Returns false (and counts nothing) before `start`.
    pub fn begin_frame(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.frames += 1;
        true
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
