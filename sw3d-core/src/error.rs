/// Errors raised by the matrix algebra and mesh construction
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The left operand's column count differs from the right operand's row count.
    #[error("incompatible matrices {left_width}x{left_height} and {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },

    #[error("expected a 4x1 point matrix, got {width}x{height}")]
    NotAPoint { width: usize, height: usize },

    #[error("face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("unknown step `{0}`")]
    UnknownStep(String),
}

pub type Result<T> = std::result::Result<T, Error>;
