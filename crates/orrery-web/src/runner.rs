use orrery_engine::{
    write_frame, DrawList, FrameClock, FrameSnapshot, InputEvent, InputQueue,
    ProtocolLayout, Result, Session, SessionConfig,
};

/// Wires a `Session` to the browser frame loop.
///
/// The wasm exports in `lib.rs` keep one runner in a `thread_local!`,
/// because wasm-bindgen cannot export generic structs directly.
pub struct SessionRunner {
    session: Session,
    input: InputQueue,
    clock: FrameClock,
    draw_list: DrawList,
    layout: ProtocolLayout,
    /// Flat frame buffer read by the host renderer.
    frame: Vec<f32>,
}

impl SessionRunner {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let layout = ProtocolLayout::from_config(&config);
        let frame = layout.alloc();
        let session = Session::new(config)?;

        Ok(Self {
            session,
            input: InputQueue::new(),
            clock: FrameClock::default(),
            draw_list: DrawList::new(),
            layout,
            frame,
        })
    }

    /// Start the render loop. Call once after construction.
    pub fn start(&mut self) {
        self.session.start();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at host timestamp `now_ms` and repack the frame buffer.
    pub fn tick(&mut self, now_ms: f64) {
        // Clear per-frame transient data
        self.session.clear_frame_data();

        let dt = self.clock.advance(now_ms);
        self.session.tick(dt, &mut self.input, &mut self.draw_list);

        write_frame(
            &self.layout,
            &FrameSnapshot {
                frame: self.session.frames(),
                draw_list: &self.draw_list,
                events: self.session.events(),
                selected: self.session.selection(),
                multiplier: self.session.multiplier(),
                viewport: self.session.viewport(),
                lighting: &self.session.scene().lighting,
            },
            &mut self.frame,
        );
    }

    /// Panel HTML if it changed since the last call.
    pub fn take_panel_update(&mut self) -> Option<String> {
        let panel = self.session.panel_mut();
        panel.take_dirty().then(|| panel.to_html())
    }

    pub fn panel_html(&self) -> String {
        self.session.panel().to_html()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn teardown(self) {
        self.session.teardown();
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame.len() as u32
    }

    /// Star positions are collected on the first rendered frame.
    pub fn points_ptr(&self) -> *const f32 {
        self.draw_list.point_positions.as_ptr()
    }

    pub fn points_len(&self) -> u32 {
        self.draw_list.point_positions.len() as u32
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
