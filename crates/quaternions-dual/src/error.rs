use quaternions_core::QuaternionError;
use thiserror::Error;

/// Error type for dual number and dual quaternion operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DualError {
    /// The real and dual parts do not describe the same batch.
    #[error("Shape mismatch: real part has {left} elements, dual part has {right}")]
    ShapeMismatch {
        /// Length of the real part
        left: usize,
        /// Length of the dual part
        right: usize,
    },

    /// Index exceeds the batch length.
    #[error("Index {index} out of bounds for batch of size {size}")]
    IndexOutOfBounds {
        /// The invalid index that was attempted
        index: usize,
        /// The number of elements in the batch
        size: usize,
    },

    /// The operation is undefined for the value, e.g. inverting a pure dual number.
    #[error("Invalid algebraic state: {0}")]
    InvalidAlgebraicState(&'static str),

    /// A displacement rotation does not have unit magnitude.
    #[error("Rotation quaternion is not unitary, magnitude {magnitude}")]
    NonUnitRotation {
        /// Magnitude of the first offending element
        magnitude: f64,
    },

    /// A displacement translation has a non-zero scalar part.
    #[error("Translation quaternion is not a pure vector, scalar part {scalar}")]
    NonPureTranslation {
        /// Scalar part of the first offending element
        scalar: f64,
    },

    /// Error raised by the underlying quaternion algebra.
    #[error(transparent)]
    Quaternion(#[from] QuaternionError),
}

impl DualError {
    /// Creates a ShapeMismatch error.
    pub fn shape_mismatch(left: usize, right: usize) -> Self {
        Self::ShapeMismatch { left, right }
    }

    /// Creates an IndexOutOfBounds error.
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }
}
