use thiserror::Error;

/// Top-level error type for aimrail-core.
#[derive(Debug, Error)]
pub enum AimrailError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid control_dt: {0} (must be > 0)")]
    InvalidControlDt(f64),

    #[error("Invalid blend speed: {0} (must be in 0..=20)")]
    InvalidSpeed(f32),

    #[error("Empty target name for binding {0}")]
    EmptyTargetName(usize),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
