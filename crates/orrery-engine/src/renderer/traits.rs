//! Graphics capability the render loop draws through.
//!
//! The engine never rasterizes. The default backend is `DrawList`, which
//! flattens the scene into wire records for the host renderer (WebGPU,
//! WebGL or Canvas on the JS side). Native backends implement the same trait.

use crate::core::scene::SceneGraph;
use super::camera::PerspectiveCamera;

/// Draws the scene graph as seen from a camera.
///
/// # Example Implementation
///
/// ```ignore
/// struct CountingBackend { frames: u32 }
///
/// impl RenderBackend for CountingBackend {
///     fn backend(&self) -> &'static str { "counting" }
///     fn render(&mut self, _scene: &SceneGraph, _camera: &PerspectiveCamera) {
///         self.frames += 1;
///     }
/// }
/// ```
pub trait RenderBackend {
    /// Backend identifier (e.g. "draw-list", "webgl").
    fn backend(&self) -> &'static str;

    /// Draw one frame.
    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera);

    /// Handle a viewport resize. Backends without size-dependent state ignore it.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Backend that draws nothing. Useful for headless sessions.
#[derive(Debug, Default)]
pub struct NullBackend {
    pub frames: u64,
}

impl RenderBackend for NullBackend {
    fn backend(&self) -> &'static str {
        "null"
    }

    fn render(&mut self, _scene: &SceneGraph, _camera: &PerspectiveCamera) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_backend_counts_frames() {
        let scene = SceneGraph::new();
        let camera = PerspectiveCamera::default();
        let mut backend = NullBackend::default();
        backend.render(&scene, &camera);
        backend.render(&scene, &camera);
        assert_eq!(backend.frames, 2);
        assert_eq!(backend.backend(), "null");
    }
}
