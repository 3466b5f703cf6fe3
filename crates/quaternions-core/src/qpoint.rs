use std::ops::Deref;

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::{error::QuaternionError, quaternion::Quaternion};

/// A batch of pure quaternions `0 + xi + yj + zk` encoding 3D points.
///
/// The point `[x, y, z]` is packed as `a = xi` and `b = y + zi`.
#[derive(Debug, Clone, PartialEq)]
pub struct QPoint(Quaternion);

impl QPoint {
    /// Create a batch of pure quaternions from an Nx3 point array.
    ///
    /// # Errors
    ///
    /// Returns [`QuaternionError::InvalidPointShape`] if `points` is not Nx3.
    ///
    /// Example:
    ///
    /// ```
    /// use ndarray::array;
    /// use quaternions_core::QPoint;
    ///
    /// let p = QPoint::from_points(&array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    /// assert_eq!(p.len(), 2);
    /// assert_eq!(p.scal(), array![0.0, 0.0]);
    /// ```
    pub fn from_points(points: &Array2<f64>) -> Result<Self, QuaternionError> {
        let (rows, cols) = points.dim();
        if cols != 3 {
            return Err(QuaternionError::InvalidPointShape(rows, cols));
        }
        let a: Array1<Complex64> = points.column(0).mapv(|x| Complex64::new(0.0, x));
        let b: Array1<Complex64> = points
            .rows()
            .into_iter()
            .map(|row| Complex64::new(row[1], row[2]))
            .collect();
        Ok(Self(Quaternion::from_batch(a, b)?))
    }

    /// Create a single pure quaternion from one point.
    pub fn from_point(point: [f64; 3]) -> Self {
        Self(Quaternion::from_parts(0.0, point[0], point[1], point[2]))
    }

    /// The encoded points as an Nx3 array.
    pub fn points(&self) -> Array2<f64> {
        self.0.vect()
    }

    /// Unwrap into the underlying quaternion batch.
    pub fn into_inner(self) -> Quaternion {
        self.0
    }
}

impl Deref for QPoint {
    type Target = Quaternion;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<QPoint> for Quaternion {
    #[inline]
    fn from(p: QPoint) -> Self {
        p.0
    }
}
