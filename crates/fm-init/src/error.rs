use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InitError {
    #[error("invalid mask: {width}x{height} has an empty dimension")]
    InvalidInput { width: usize, height: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("type mismatch: can only compare against {expected}")]
    TypeMismatch { expected: &'static str },

    #[error("arrival-time bound {bound} leaves no headroom below sentinel {sentinel}")]
    SentinelHeadroom { bound: f32, sentinel: f32 },

    #[error(transparent)]
    Core(#[from] fm_core::Error),
}

pub type Result<T> = std::result::Result<T, InitError>;
