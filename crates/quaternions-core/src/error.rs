use thiserror::Error;

/// Error type for quaternion construction and algebra.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuaternionError {
    /// The two packed components of a batch do not have the same length.
    ///
    /// A quaternion batch stores `a = w + xi` and `b = y + zi` side by side,
    /// so both arrays must describe the same number of elements.
    #[error("Shape mismatch: left batch has {left} elements, right batch has {right}")]
    ShapeMismatch {
        /// Length of the left-hand batch
        left: usize,
        /// Length of the right-hand batch
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

    /// A rotation matrix was expected but the input is not 3x3.
    #[error("Expected a 3x3 rotation matrix, got {0}x{1}")]
    InvalidMatrixShape(usize, usize),

    /// A point array was expected but the input is not Nx3.
    #[error("Expected an Nx3 point array, got {0}x{1}")]
    InvalidPointShape(usize, usize),

    /// The operation has no defined result for the given quaternion.
    ///
    /// # Common Causes
    /// - Normalizing or inverting a zero quaternion
    /// - Extracting the axis of the identity rotation
    /// - Taking the logarithm of a non-positive real quaternion
    #[error("Singular geometry in {operation}: {reason}")]
    SingularGeometry {
        /// Name of the operation that failed
        operation: &'static str,
        /// Why the input is singular
        reason: &'static str,
    },
}

impl QuaternionError {
    /// Creates a ShapeMismatch error.
    pub fn shape_mismatch(left: usize, right: usize) -> Self {
        Self::ShapeMismatch { left, right }
    }

    /// Creates an IndexOutOfBounds error.
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// Creates a SingularGeometry error.
    pub fn singular(operation: &'static str, reason: &'static str) -> Self {
        Self::SingularGeometry { operation, reason }
    }
}
