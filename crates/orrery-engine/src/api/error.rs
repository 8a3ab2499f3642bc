use thiserror::Error;

/// Startup failures surfaced to the host. The per-frame simulation itself never fails.
#[derive(Debug, Error)]
pub enum OrreryError {
    #[error("invalid session config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid body registry entry {body}: {reason}")]
    InvalidRegistry { body: String, reason: String },

    #[error("invalid config field {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

pub type Result<T> = std::result::Result<T, OrreryError>;
