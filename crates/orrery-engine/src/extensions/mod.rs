// extensions/mod.rs
//
// Time-based animation helpers. Decoupled from the scene graph: the session
// owns the animator and applies tweened values to the camera itself.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, ease, ease_vec3};
pub use tween::{Animator, TweenState, Tween, TweenId, TweenTarget};
