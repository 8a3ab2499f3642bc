use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::api::error::{OrreryError, Result};
use crate::extensions::easing::Easing;

/// Session configuration, provided by the host as JSON.
/// Every field is optional; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Vertical field of view in degrees (default: 75).
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Camera home position (default: [0, 50, 100]).
    pub camera_position: [f32; 3],

    /// Fly-to duration in seconds (default: 1.0).
    pub fly_duration: f32,
    /// Fly-to easing (default: "cubic_in_out").
    pub fly_easing: Easing,
    /// Camera lands at body position times this (default: 1.5).
    pub pull_back: f32,
    /// Extra camera height above the scaled body position (default: 5).
    pub vertical_offset: f32,

    /// Speed-up / slow-down factor (default: 1.5).
    pub speed_step: f64,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
    /// Planet self-rotation per frame in radians (default: 0.01).
    pub spin_per_frame: f32,

    /// Orbit-controls damping factor (default: 0.05).
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Pointer travel in pixels before a press becomes a drag (default: 5).
    pub drag_threshold: f32,

    pub star_count: usize,
    /// Edge length of the starfield cube (default: 2000).
    pub star_spread: f32,
    pub star_size: f32,
    /// Ray-to-star distance that counts as a hit (default: 1.0).
    pub star_pick_threshold: f32,

    /// Fixed seed for star placement and start angles. The web host fills
    /// this from `Math.random` when absent.
    pub seed: Option<u64>,
    /// Delay before the host hides its loading screen (default: 1500).
    pub startup_delay_ms: u32,

    /// Initial canvas size in pixels.
    pub viewport_width: f32,
    pub viewport_height: f32,

    /// Frame buffer capacities.
    pub max_instances: usize,
    pub max_events: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_position: [0.0, 50.0, 100.0],
            fly_duration: 1.0,
            fly_easing: Easing::CubicInOut,
            pull_back: 1.5,
            vertical_offset: 5.0,
            speed_step: 1.5,
            min_multiplier: 0.01,
            max_multiplier: 50.0,
            spin_per_frame: 0.01,
            damping_factor: 0.05,
            min_distance: 20.0,
            max_distance: 500.0,
            drag_threshold: 5.0,
            star_count: 5000,
            star_spread: 2000.0,
            star_size: 0.1,
            star_pick_threshold: 1.0,
            seed: None,
            startup_delay_ms: 1500,
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_instances: 64,
            max_events: 32,
        }
    }
}

impl SessionConfig {
    /// Parse from JSON. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the session would otherwise trust blindly: inverted
    /// clamp ranges, a non-positive multiplier range or step, and
    /// non-finite camera parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(OrreryError::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        if !(self.speed_step.is_finite() && self.speed_step > 0.0) {
            return Err(invalid("speed_step", format!("{} is not a finite value > 0", self.speed_step)));
        }
        if !(self.min_multiplier > 0.0) {
            return Err(invalid("min_multiplier", format!("{} is not > 0", self.min_multiplier)));
        }
        if !(self.min_multiplier <= self.max_multiplier) {
            return Err(invalid(
                "max_multiplier",
                format!("{} is below min_multiplier {}", self.max_multiplier, self.min_multiplier),
            ));
        }
        if !(self.min_distance <= self.max_distance) {
            return Err(invalid(
                "max_distance",
                format!("{} is below min_distance {}", self.max_distance, self.min_distance),
            ));
        }
        if !(self.fly_duration >= 0.0) {
            return Err(invalid("fly_duration", format!("{} is negative", self.fly_duration)));
        }
        for (field, value) in [("fov", self.fov), ("near", self.near), ("far", self.far)] {
            if !value.is_finite() {
                return Err(invalid(field, format!("{} is not finite", value)));
            }
        }
        Ok(())
    }

    pub fn home_position(&self) -> Vec3 {
        Vec3::from_array(self.camera_position)
    }

    pub fn aspect(&self) -> f32 {
        self.viewport_width / self.viewport_height
    }
}

fn invalid(field: &'static str, reason: String) -> OrreryError {
    OrreryError::InvalidSetting { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_json_is_default() {
        assert_eq!(SessionConfig::from_json("").unwrap(), SessionConfig::default());
        assert_eq!(SessionConfig::from_json("  ").unwrap(), SessionConfig::default());
        assert_eq!(SessionConfig::from_json("{}").unwrap(), SessionConfig::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = SessionConfig::from_json(
            r#"{ "star_count": 100, "fly_easing": "sine_in_out", "seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(config.star_count, 100);
        assert_eq!(config.fly_easing, Easing::SineInOut);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.fov, 75.0);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = SessionConfig::from_json("{ star_count: ").unwrap_err();
        assert!(matches!(err, OrreryError::Config(_)));
    }

    #[test]
    fn zero_viewport_rejected() {
        let err = SessionConfig::from_json(r#"{ "viewport_width": 0 }"#).unwrap_err();
        assert!(matches!(err, OrreryError::InvalidViewport { .. }));
    }

    fn rejected_field(json: &str) -> &'static str {
        match SessionConfig::from_json(json).unwrap_err() {
            OrreryError::InvalidSetting { field, .. } => field,
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn non_positive_speed_step_rejected() {
        assert_eq!(rejected_field(r#"{ "speed_step": 0 }"#), "speed_step");
        assert_eq!(rejected_field(r#"{ "speed_step": -1.5 }"#), "speed_step");
    }

    #[test]
    fn non_positive_min_multiplier_rejected() {
        assert_eq!(rejected_field(r#"{ "min_multiplier": 0 }"#), "min_multiplier");
        assert_eq!(
            rejected_field(r#"{ "speed_step": -1.5, "min_multiplier": -50 }"#),
            "speed_step"
        );
    }

    #[test]
    fn inverted_multiplier_range_rejected() {
        assert_eq!(
            rejected_field(r#"{ "min_multiplier": 10, "max_multiplier": 1 }"#),
            "max_multiplier"
        );
    }

    #[test]
    fn inverted_distance_range_rejected() {
        assert_eq!(rejected_field(r#"{ "min_distance": 600 }"#), "max_distance");
    }

    #[test]
    fn negative_fly_duration_rejected() {
        assert_eq!(rejected_field(r#"{ "fly_duration": -1 }"#), "fly_duration");
    }

    #[test]
    fn non_finite_camera_rejected() {
        let config = SessionConfig { near: f32::NAN, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(OrreryError::InvalidSetting { field: "near", .. })
        ));
        let config = SessionConfig { fov: f32::INFINITY, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(OrreryError::InvalidSetting { field: "fov", .. })
        ));
    }

    #[test]
    fn equal_bounds_accepted() {
        let config = SessionConfig {
            min_multiplier: 2.0,
            max_multiplier: 2.0,
            min_distance: 50.0,
            max_distance: 50.0,
            fly_duration: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
