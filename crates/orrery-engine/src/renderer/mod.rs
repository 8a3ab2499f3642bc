pub mod camera;
pub mod controls;
pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{PerspectiveCamera, CameraUniform};
pub use controls::OrbitControls;
pub use instance::{MeshInstance, DrawList};
pub use traits::{RenderBackend, NullBackend};
