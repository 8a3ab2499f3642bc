/// Turns host frame timestamps into per-frame deltas.
///
/// The simulation advances exactly once per rendered frame (no fixed timestep);
/// the delta only drives time-based work such as camera tweens.
pub struct FrameClock {
    /// Largest delta handed out, in seconds.
    max_dt: f32,
    /// Timestamp of the previous frame in milliseconds.
    last_ms: Option<f64>,
    /// Frames observed so far.
    frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt,
            last_ms: None,
            frames: 0,
        }
    }

    /// Record a frame at `now_ms` and return the elapsed seconds since the last one.
    /// The first frame yields 0. Deltas are capped so a backgrounded tab does not
    /// complete every tween in one jump.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, self.max_dt),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.frames += 1;
        dt
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }

    /// Forget the previous timestamp (e.g. after the loop was suspended).
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(1234.0), 0.0);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn delta_in_seconds() {
        let mut clock = FrameClock::default();
        clock.advance(1000.0);
        let dt = clock.advance(1016.0);
        assert!((dt - 0.016).abs() < 1e-6, "dt was {}", dt);
    }

    #[test]
    fn caps_long_gaps() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(0.0);
        assert_eq!(clock.advance(5000.0), 0.1);
    }

    #[test]
    fn backwards_timestamps_clamp_to_zero() {
        let mut clock = FrameClock::default();
        clock.advance(500.0);
        assert_eq!(clock.advance(400.0), 0.0);
    }

    #[test]
    fn reset_restarts_deltas() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        clock.reset();
        assert_eq!(clock.advance(10_000.0), 0.0);
    }
}
