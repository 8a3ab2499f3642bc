use glam::{Vec2, Vec3};
use crate::api::config::SessionConfig;
use crate::api::error::Result;
use crate::api::types::{NodeId, SessionEvent};
use crate::assets::registry::BodyRegistry;
use crate::core::rng::Rng;
use crate::core::scene::SceneGraph;
use crate::extensions::tween::{Animator, TweenState};
use crate::input::queue::{Command, InputEvent, InputQueue};
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::controls::OrbitControls;
use crate::renderer::traits::RenderBackend;
use crate::systems::director::{apply_tween, CameraDirector};
use crate::systems::info_panel::InfoPanel;
use crate::systems::orbit::{self, OrbitalState, SpeedControl};
use crate::systems::picking::{self, SceneRaycaster};
use crate::systems::render_loop::{LoopState, RenderLoop};
use crate::systems::scene_builder::{build_scene, StarfieldConfig};

/// Seed used when neither the config nor the host supplies one.
const FALLBACK_SEED: u64 = 0x5eed_0f_0bb1;

/// Press/move/release tracking that tells drags from clicks.
#[derive(Debug, Default)]
struct DragState {
    pressed_at: Option<Vec2>,
    last: Vec2,
    dragging: bool,
    /// The click event that follows a drag release must not pick.
    suppress_click: bool,
}

/// One visualization session: the scene, camera rig, orbital states,
/// selection and speed multiplier, plus the animator driving camera flights.
///
/// The host creates it once, calls `start`, then `tick` once per frame.
pub struct Session<A: Animator = TweenState> {
    config: SessionConfig,
    registry: BodyRegistry,
    scene: SceneGraph,
    planets: Vec<OrbitalState>,
    sun: NodeId,
    stars: NodeId,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    director: CameraDirector,
    animator: A,
    raycaster: SceneRaycaster,
    speed: SpeedControl,
    selection: Option<usize>,
    panel: InfoPanel,
    render_loop: RenderLoop,
    viewport: Vec2,
    drag: DragState,
    events: Vec<SessionEvent>,
}

impl Session<TweenState> {
    /// Create a session over the solar system with the default animator.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_animator(config, BodyRegistry::solar_system(), TweenState::new())
    }
}

impl<A: Animator> Session<A> {
    /// Create a session with an explicit registry and animator.
    pub fn with_animator(config: SessionConfig, registry: BodyRegistry, animator: A) -> Result<Self> {
        config.validate()?;
        registry.validate()?;

        let mut rng = Rng::new(config.seed.unwrap_or(FALLBACK_SEED));
        let stars = StarfieldConfig {
            count: config.star_count,
            spread: config.star_spread,
            size: config.star_size,
        };
        let built = build_scene(&registry, &stars, &mut rng);

        let home = config.home_position();
        let camera = PerspectiveCamera::new(config.fov, config.aspect(), config.near, config.far)
            .with_position(home)
            .with_target(Vec3::ZERO);
        let mut controls = OrbitControls::new(config.damping_factor, config.min_distance, config.max_distance);
        controls.enable_damping = true;
        let director = CameraDirector::new(home)
            .with_timing(config.fly_duration, config.fly_easing)
            .with_framing(config.pull_back, config.vertical_offset);

        log::info!(
            "Session created: {} planets, viewport {}x{}",
            built.planets.len(),
            config.viewport_width,
            config.viewport_height
        );

        Ok(Self {
            raycaster: SceneRaycaster::new(config.star_pick_threshold),
            speed: SpeedControl::new(config.speed_step, config.min_multiplier, config.max_multiplier),
            viewport: Vec2::new(config.viewport_width, config.viewport_height),
            registry,
            scene: built.scene,
            planets: built.planets,
            sun: built.sun,
            stars: built.stars,
            camera,
            controls,
            director,
            animator,
            selection: None,
            panel: InfoPanel::new(),
            render_loop: RenderLoop::new(),
            drag: DragState::default(),
            events: Vec::new(),
            config,
        })
    }

    /// Begin the per-frame loop. Ticks before this are ignored.
    pub fn start(&mut self) {
        if self.render_loop.start() {
            log::info!("Render loop started");
        }
    }

    /// Run one frame: apply queued input, advance orbits, advance camera
    /// tweens, settle the orbit controls, then draw.
    pub fn tick(&mut self, dt: f32, input: &mut InputQueue, backend: &mut dyn RenderBackend) {
        if !self.render_loop.begin_frame() {
            return;
        }

        for event in input.drain() {
            self.handle_input(event, backend);
        }

        orbit::advance(
            &mut self.planets,
            &mut self.scene,
            self.speed.multiplier(),
            self.config.spin_per_frame,
        );

        let camera = &mut self.camera;
        self.animator.tick(dt, &mut |target, value| apply_tween(camera, target, value));
        self.controls.update(&mut self.camera);

        backend.render(&self.scene, &self.camera);
    }

    /// Apply a single input event.
    pub fn handle_input(&mut self, event: InputEvent, backend: &mut dyn RenderBackend) {
        match event {
            InputEvent::PointerDown { x, y } => {
                let p = Vec2::new(x, y);
                self.drag = DragState {
                    pressed_at: Some(p),
                    last: p,
                    dragging: false,
                    suppress_click: false,
                };
            }
            InputEvent::PointerMove { x, y } => {
                let p = Vec2::new(x, y);
                let Some(origin) = self.drag.pressed_at else { return };
                if !self.drag.dragging && p.distance(origin) > self.config.drag_threshold {
                    self.drag.dragging = true;
                }
                if self.drag.dragging {
                    let delta = p - self.drag.last;
                    self.controls.rotate_by_pixels(delta.x, delta.y, self.viewport.y);
                }
                self.drag.last = p;
            }
            InputEvent::PointerUp { .. } => {
                self.drag.suppress_click = self.drag.dragging;
                self.drag.pressed_at = None;
                self.drag.dragging = false;
            }
            InputEvent::Click { x, y } => {
                if std::mem::take(&mut self.drag.suppress_click) {
                    log::debug!("click after drag ignored");
                    return;
                }
                self.click(x, y);
            }
            InputEvent::Wheel { delta_y } => self.controls.wheel(delta_y),
            InputEvent::Command(command) => self.command(command),
            InputEvent::Resize { width, height } => {
                if self.resize(width as f32, height as f32) {
                    backend.resize(width, height);
                }
            }
        }
    }

    pub fn command(&mut self, command: Command) {
        log::debug!("command {:?}", command);
        match command {
            Command::SpeedUp => self.speed_up(),
            Command::SlowDown => self.slow_down(),
            Command::ResetView => self.reset_view(),
        }
    }

    /// Pick at canvas pixel (x, y). A hit selects that planet; a miss changes nothing.
    pub fn click(&mut self, x: f32, y: f32) -> Option<usize> {
        let hit = picking::pick(
            Vec2::new(x, y),
            self.viewport,
            &self.camera,
            &self.scene,
            &self.planets,
            &self.raycaster,
        );
        if let Some(index) = hit {
            self.select(index);
        }
        hit
    }

    /// Select a planet by index: show it in the panel and fly the camera to it.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(state) = self.planets.get(index) else {
            log::warn!("select: no planet at index {}", index);
            return false;
        };
        self.panel.present(state);
        self.director.fly_to(state, &self.camera, &mut self.animator);
        self.events.push(SessionEvent::selection(Some(index), state.orbital_distance));
        log::info!("Selected {}", state.name);
        self.selection = Some(index);
        true
    }

    pub fn speed_up(&mut self) {
        let clamped = self.speed.speed_up();
        self.events.push(SessionEvent::speed(self.speed.multiplier(), clamped));
    }

    pub fn slow_down(&mut self) {
        let clamped = self.speed.slow_down();
        self.events.push(SessionEvent::speed(self.speed.multiplier(), clamped));
    }

    /// Back to the initial view: multiplier 1, home camera, no selection,
    /// placeholder panel. Flights in progress are cancelled.
    pub fn reset_view(&mut self) {
        self.speed.reset();
        self.director.reset_view(&mut self.camera, &mut self.animator);
        self.controls.stop();
        self.panel.clear();
        if self.selection.take().is_some() {
            self.events.push(SessionEvent::selection(None, 0.0));
        }
        self.events.push(SessionEvent::speed(self.speed.multiplier(), false));
        self.events.push(SessionEvent::view_reset());
    }

    /// Recompute aspect and viewport. Zero-sized canvases are ignored.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("ignoring resize to {}x{}", width, height);
            return false;
        }
        self.viewport = Vec2::new(width, height);
        self.camera.set_viewport(width, height);
        log::debug!("resized to {}x{}", width, height);
        true
    }

    /// Release everything the session owns.
    pub fn teardown(mut self) {
        self.animator.cancel_all();
        self.scene.clear();
        log::info!("Session torn down after {} frames", self.render_loop.frames());
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn planets(&self) -> &[OrbitalState] {
        &self.planets
    }

    pub fn sun(&self) -> NodeId {
        self.sun
    }

    pub fn stars(&self) -> NodeId {
        self.stars
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn selected(&self) -> Option<&OrbitalState> {
        self.selection.and_then(|i| self.planets.get(i))
    }

    pub fn multiplier(&self) -> f64 {
        self.speed.multiplier()
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut InfoPanel {
        &mut self.panel
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn loop_state(&self) -> LoopState {
        self.render_loop.state()
    }

    pub fn frames(&self) -> u64 {
        self.render_loop.frames()
    }

    /// Events emitted since the last `clear_frame_data`.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Clear per-frame transient data (events).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}
