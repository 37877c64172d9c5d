use thiserror::Error;

use crate::graph::VertexId;

/// The two classes of caller-side precondition failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    ArgumentAbsent,
    ArgumentOutOfRange,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("vertex {0:?} is not part of this graph")]
    MissingVertex(VertexId),
    #[error("a vertex with equal data already exists as {0:?}")]
    DuplicateVertex(VertexId),
    #[error("edge weight {weight} must be finite and non-negative")]
    InvalidWeight { weight: f64 },
}

impl GraphError {
    pub fn kind(&self) -> ViolationKind {
        match self {
            GraphError::MissingVertex(_) => ViolationKind::ArgumentAbsent,
            GraphError::DuplicateVertex(_) | GraphError::InvalidWeight { .. } => {
                ViolationKind::ArgumentOutOfRange
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    #[error("tile map has no floor {floor}")]
    MissingFloor { floor: i32 },
    #[error("insert x {x} outside 0..{width}")]
    XOutOfRange { x: i32, width: i32 },
    #[error("insert y {y} outside 0..{height}")]
    YOutOfRange { y: i32, height: i32 },
    #[error("matrix end x {end_x} exceeds map width {width}")]
    MatrixExceedsWidth { end_x: i32, width: i32 },
    #[error("matrix end y {end_y} exceeds map height {height}")]
    MatrixExceedsHeight { end_y: i32, height: i32 },
}

impl InsertError {
    pub fn kind(&self) -> ViolationKind {
        match self {
            InsertError::MissingFloor { .. } => ViolationKind::ArgumentAbsent,
            _ => ViolationKind::ArgumentOutOfRange,
        }
    }

    /// True when the offending coordinate lies below zero rather than at or past the edge.
    pub fn is_below_range(&self) -> bool {
        matches!(
            self,
            InsertError::XOutOfRange { x, .. } | InsertError::YOutOfRange { y: x, .. } if *x < 0
        )
    }
}

/// Rejected tile matrix layout, typically from deserialized input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("matrix dimensions {width}x{height} must not be negative")]
    NegativeSize { width: i32, height: i32 },
    #[error("matrix {width}x{height} needs {expected} tiles, got {actual}")]
    TileCount { width: i32, height: i32, expected: usize, actual: usize },
    #[error("matrix rows have unequal lengths")]
    Ragged,
    #[error("matrix side {0} does not fit in i32")]
    TooLarge(usize),
}
