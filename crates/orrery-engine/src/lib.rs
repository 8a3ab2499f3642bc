pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::SessionConfig;
pub use api::error::{OrreryError, Result};
pub use api::session::Session;
pub use api::types::{NodeId, SessionEvent};
pub use assets::bodies::{BodyDescriptor, SunDescriptor, PLANETS, SUN};
pub use assets::registry::BodyRegistry;
pub use components::mesh::{Color, Material, MeshComponent, Shape, Side};
pub use components::node::Node;
pub use components::transform::Transform;
pub use crate::core::rng::Rng;
pub use crate::core::scene::SceneGraph;
pub use crate::core::time::FrameClock;
pub use input::queue::{Command, InputEvent, InputQueue};
pub use renderer::camera::{PerspectiveCamera, CameraUniform};
pub use renderer::controls::OrbitControls;
pub use renderer::instance::{MeshInstance, DrawList};
pub use renderer::traits::{RenderBackend, NullBackend};
pub use bridge::protocol::{ProtocolLayout, FrameSnapshot, write_frame};
pub use systems::director::CameraDirector;
pub use systems::info_panel::{InfoPanel, PanelContent};
pub use systems::lighting::{PointLight, LightState};
pub use systems::orbit::{OrbitalState, SpeedControl, orbit_position};
pub use systems::picking::{Hit, Intersector, Ray, SceneRaycaster, pointer_to_ndc};
pub use systems::render::build_draw_list;
pub use systems::render_loop::{LoopState, RenderLoop};
pub use systems::scene_builder::{build_scene, BuiltScene, StarfieldConfig};

// Extensions: decoupled animation helpers
pub use extensions::{
    Easing, lerp, ease, ease_vec3,
    Animator, TweenState, Tween, TweenId, TweenTarget,
};
