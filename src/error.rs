use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum KdIndexError {
    /// A point set with zero points was supplied at construction.
    #[error("point set must contain at least one point")]
    EmptyPointSet,

    /// A dimension of zero was supplied at construction.
    #[error("point dimension must be greater than zero")]
    ZeroDimension,

    /// A point's length disagrees with the dimension of the index.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The tree has no root node or no stored points.
    #[error("invalid tree state: no root node or empty storage")]
    InvalidTreeState,

    /// An original-order point index outside `[0, len)`.
    #[error("point index {index} out of bounds for {len} points")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A persisted buffer whose header is not a kd-index tree.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Payload (de)serialization failure.
    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// Underlying I/O failure while reading or writing a tree.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KdIndexError>;
