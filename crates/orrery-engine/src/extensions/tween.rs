// extensions/tween.rs
//
// Tween system: animated Vec3 transitions keyed by the property they drive.
// Decoupled from the camera: values are handed back through a callback.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.animate(TweenTarget::CameraPosition, from, to, 1.0, Easing::CubicInOut);
//   tweens.tick(dt, &mut |target, value| rig.set(target, value));

use std::collections::HashMap;
use glam::Vec3;
use super::easing::{Easing, ease_vec3};

/// Which property a tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    /// The camera's world position.
    CameraPosition,
    /// The orbit-controls look-at point.
    ControlsTarget,
}

/// Handle to a running tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// A single Vec3 tween.
#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    pub from: Vec3,
    pub to: Vec3,
    /// Duration in seconds.
    pub duration: f32,
    /// Elapsed time.
    pub elapsed: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(target: TweenTarget, from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn value(&self) -> Vec3 {
        ease_vec3(self.from, self.to, self.progress(), self.easing)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Capability to interpolate properties over time.
///
/// Starting a tween on a target that already has one in flight supersedes it:
/// the old tween is dropped and the new one runs from `from` (last write wins).
pub trait Animator {
    fn animate(
        &mut self,
        target: TweenTarget,
        from: Vec3,
        to: Vec3,
        duration: f32,
        easing: Easing,
    ) -> TweenId;

    /// Stop a tween where it is. Returns false if it already finished.
    fn cancel(&mut self, id: TweenId) -> bool;

    fn cancel_all(&mut self);

    /// Advance every tween by `dt` seconds, writing values through `apply`.
    /// Returns the number of tweens that completed this tick.
    fn tick(&mut self, dt: f32, apply: &mut dyn FnMut(TweenTarget, Vec3)) -> usize;

    fn is_active(&self, id: TweenId) -> bool;
}

/// Time-driven animator used by the session.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: HashMap<TweenId, Tween>,
    next_id: u32,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(&id)
    }

    /// The tween currently driving `target`, if any.
    pub fn for_target(&self, target: TweenTarget) -> Option<&Tween> {
        self.tweens.values().find(|t| t.target == target)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

impl Animator for TweenState {
    fn animate(
        &mut self,
        target: TweenTarget,
        from: Vec3,
        to: Vec3,
        duration: f32,
        easing: Easing,
    ) -> TweenId {
        self.tweens.retain(|_, t| t.target != target);
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, Tween::new(target, from, to, duration, easing));
        id
    }

    fn cancel(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    fn cancel_all(&mut self) {
        self.tweens.clear();
    }

    fn tick(&mut self, dt: f32, apply: &mut dyn FnMut(TweenTarget, Vec3)) -> usize {
        let mut completed = Vec::new();

        for (&id, tween) in self.tweens.iter_mut() {
            tween.elapsed += dt;
            apply(tween.target, tween.value());
            if tween.is_complete() {
                completed.push(id);
            }
        }

        let count = completed.len();
        for id in completed {
            self.tweens.remove(&id);
        }
        count
    }

    fn is_active(&self, id: TweenId) -> bool {
        self.tweens.contains_key(&id)
    }
}
