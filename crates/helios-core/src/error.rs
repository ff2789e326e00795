use thiserror::Error;

/// Errors that can occur during Helios initialization and wiring.
#[derive(Debug, Error)]
pub enum HeliosError {
    #[error("Failed to parse config RON: {0}")]
    ConfigParse(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to register {kind} listener: {reason}")]
    ListenerRegistration { kind: &'static str, reason: String },

    #[error("Browser object missing: {0}")]
    MissingDom(&'static str),

    #[error("WebGPU adapter not found: {0}")]
    AdapterNotFound(String),

    #[error("Failed to request GPU device: {0}")]
    DeviceRequestFailed(String),

    #[error("Surface configuration failed: {0}")]
    SurfaceConfigFailed(String),
}

/// Errors returned by fullscreen operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FullscreenError {
    /// Neither vendor fullscreen API was detected at startup.
    /// Callers are expected to check `available()` first.
    #[error("fullscreen API not available in this environment")]
    Unsupported,

    #[error("fullscreen host call failed: {0}")]
    Host(String),
}
