use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("extent mismatch: expected {expected:?}, got {actual:?}")]
    ExtentMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("out of bounds")]
    OutOfBounds,
}
