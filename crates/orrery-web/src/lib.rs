//! Browser bridge for the orrery.
//!
//! The host page calls `orrery_init` once (after its loading delay), then
//! `orrery_tick` from `requestAnimationFrame`. Pointer, wheel, button and
//! resize events are queued and applied on the next tick. Frame data is read
//! straight out of wasm memory through the pointer accessors.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use orrery_engine::{Command, InputEvent, SessionConfig};

pub mod runner;

pub use runner::SessionRunner;

/// Element the info panel HTML is written into.
const PANEL_ELEMENT_ID: &str = "planet-info";

thread_local! {
    static RUNNER: RefCell<Option<SessionRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. Calls before `orrery_init` are dropped.
fn with_runner<R>(f: impl FnOnce(&mut SessionRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("orrery not initialized, call orrery_init() first");
                None
            }
        }
    })
}

fn to_js(err: orrery_engine::OrreryError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Milliseconds the host should wait after page load before calling `orrery_init`.
#[wasm_bindgen]
pub fn orrery_startup_delay_ms(config_json: &str) -> u32 {
    SessionConfig::from_json(config_json)
        .map(|c| c.startup_delay_ms)
        .unwrap_or_else(|_| SessionConfig::default().startup_delay_ms)
}

#[wasm_bindgen]
pub fn orrery_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut config = SessionConfig::from_json(config_json).map_err(to_js)?;
    if config.seed.is_none() {
        config.seed = Some((js_sys::Math::random() * u64::MAX as f64) as u64);
    }

    let mut runner = SessionRunner::new(config).map_err(to_js)?;
    runner.start();

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    log::info!("orrery: initialized");
    Ok(())
}

/// Advance one frame. `now_ms` is the `requestAnimationFrame` timestamp.
#[wasm_bindgen]
pub fn orrery_tick(now_ms: f64) {
    let update = with_runner(|r| {
        r.tick(now_ms);
        r.take_panel_update()
    });
    if let Some(Some(html)) = update {
        write_panel(&html);
    }
}

fn write_panel(html: &str) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(PANEL_ELEMENT_ID));
    match element {
        Some(el) => el.set_inner_html(html),
        None => log::warn!("#{} not found, panel update skipped", PANEL_ELEMENT_ID),
    }
}

#[wasm_bindgen]
pub fn orrery_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn orrery_click(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::Click { x, y }));
}

#[wasm_bindgen]
pub fn orrery_wheel(delta_y: f32) {
    with_runner(|r| r.push_input(InputEvent::Wheel { delta_y }));
}

/// Button command: 1 = speed up, 2 = slow down, 3 = reset view.
#[wasm_bindgen]
pub fn orrery_command(code: u32) {
    match Command::from_code(code) {
        Some(command) => {
            with_runner(|r| r.push_input(InputEvent::Command(command)));
        }
        None => log::warn!("unknown command code {}", code),
    }
}

#[wasm_bindgen]
pub fn orrery_resize(width: u32, height: u32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn orrery_teardown() {
    if let Some(runner) = RUNNER.with(|cell| cell.borrow_mut().take()) {
        runner.teardown();
    }
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_frame_len() -> u32 {
    with_runner(|r| r.frame_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_points_ptr() -> *const f32 {
    with_runner(|r| r.points_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_points_len() -> u32 {
    with_runner(|r| r.points_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_panel_html() -> String {
    with_runner(|r| r.panel_html()).unwrap_or_default()
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}
