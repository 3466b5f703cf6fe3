use std::ops::{Deref, Mul};

use ndarray::Array2;
use quaternions_core::{
    tolerance::{allclose, isclose},
    QPoint, Quaternion,
};

use crate::{
    dual_quaternion::{DQPoint, DualQuaternion},
    error::DualError,
};

/// A rigid transform encoded as the dual quaternion `qr + e (qr qt) / 2`.
///
/// `qr` is a unit rotation quaternion and `qt` a pure translation
/// quaternion. Applied to a point with the `conj3` sandwich, the displacement
/// maps `p` to `R (p + t)`.
///
/// Example:
///
/// ```
/// use ndarray::array;
/// use quaternions_core::{QPoint, Quaternion};
/// use quaternions_dual::Displacement;
///
/// let t = QPoint::from_point([1.0, 2.0, 3.0]);
/// let dis = Displacement::new(&Quaternion::default(), &t).unwrap();
/// let moved = dis.transform_points(&array![[0.0, 0.0, 0.0]]).unwrap();
/// assert_eq!(moved, array![[1.0, 2.0, 3.0]]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Displacement(DualQuaternion);

fn check_rotation(qr: &Quaternion) -> Result<(), DualError> {
    let magnitude = qr.magnitude();
    if !allclose(&magnitude, 1.0) {
        let offending = magnitude
            .iter()
            .copied()
            .find(|&m| !isclose(m, 1.0))
            .unwrap_or(f64::NAN);
        log::debug!("rejecting rotation with magnitude {offending}");
        return Err(DualError::NonUnitRotation {
            magnitude: offending,
        });
    }
    Ok(())
}

fn check_translation(qt: &Quaternion) -> Result<(), DualError> {
    let scalar = qt.scal();
    if !allclose(&scalar, 0.0) {
        let offending = scalar
            .iter()
            .copied()
            .find(|&s| !isclose(s, 0.0))
            .unwrap_or(f64::NAN);
        log::debug!("rejecting translation with scalar part {offending}");
        return Err(DualError::NonPureTranslation { scalar: offending });
    }
    Ok(())
}

impl Displacement {
    /// Create a displacement from a unit rotation and a pure translation.
    ///
    /// # Arguments
    ///
    /// * `qr` - The rotation, every element must have unit magnitude.
    /// * `qt` - The translation, every element must have a zero scalar part.
    ///
    /// # Errors
    ///
    /// Returns [`DualError::NonUnitRotation`] or [`DualError::NonPureTranslation`]
    /// when the inputs are not a valid rotation and translation, and
    /// [`DualError::ShapeMismatch`] if their batch sizes are incompatible.
    pub fn new(qr: &Quaternion, qt: &Quaternion) -> Result<Self, DualError> {
        check_rotation(qr)?;
        check_translation(qt)?;
        if qr.len() != qt.len() {
            return Err(DualError::shape_mismatch(qr.len(), qt.len()));
        }
        let qd = 0.5 * (qr * qt);
        Ok(Self(DualQuaternion::new(qr.clone(), qd)?))
    }

    /// Create a displacement from a unit rotation and an Nx3 array of translations.
    pub fn from_rotation_translation(
        qr: &Quaternion,
        translation: &Array2<f64>,
    ) -> Result<Self, DualError> {
        let qt = QPoint::from_points(translation)?;
        Self::new(qr, &qt)
    }

    /// The identity displacement repeated `n` times.
    pub fn identity(n: usize) -> Self {
        Self(DualQuaternion::identity(n))
    }

    /// The rotation part `qr`.
    pub fn rotation(&self) -> &Quaternion {
        self.0.qr()
    }

    /// The translation quaternion `qt = 2 conj(qr) qd`.
    pub fn translation_quaternion(&self) -> Quaternion {
        2.0 * (&self.0.qr().conjugate() * self.0.qd())
    }

    /// The translations as an Nx3 array.
    pub fn translation(&self) -> Array2<f64> {
        self.translation_quaternion().vect()
    }

    /// Replace rotation and translation, recomputing the coupled dual part.
    pub fn set_transform(&mut self, qr: &Quaternion, qt: &Quaternion) -> Result<(), DualError> {
        *self = Self::new(qr, qt)?;
        Ok(())
    }

    /// Replace the rotation, keeping the current translation.
    pub fn set_rotation(&mut self, qr: &Quaternion) -> Result<(), DualError> {
        let qt = self.translation_quaternion();
        self.set_transform(qr, &qt)
    }

    /// Replace the translation with an Nx3 array, keeping the current rotation.
    pub fn set_translation(&mut self, translation: &Array2<f64>) -> Result<(), DualError> {
        let qt: Quaternion = QPoint::from_points(translation)?.into();
        let qr = self.0.qr().clone();
        self.set_transform(&qr, &qt)
    }

    /// Replace the rotation component only, leaving the dual part untouched.
    ///
    /// The dual part was computed from the previous rotation, so the result
    /// generally no longer encodes the same translation.
    pub fn set_rotation_component_unchecked(&mut self, qr: Quaternion) -> Result<(), DualError> {
        self.0.set_qr(qr)
    }

    /// Replace the dual part with `QPoint(v) / 2`, without multiplying by the rotation.
    ///
    /// This only encodes the translation `v` when the rotation is the identity.
    pub fn set_dual_component_unchecked(&mut self, v: &Array2<f64>) -> Result<(), DualError> {
        let qd = 0.5 * &*QPoint::from_points(v)?;
        self.0.set_qd(qd)
    }

    /// Inverse displacement, the quaternion conjugate of a unit dual quaternion.
    pub fn inverse(&self) -> Self {
        Self(self.0.conj1())
    }

    /// Compose two displacements, `other` is applied first.
    ///
    /// A single displacement composes with every element of a batch.
    ///
    /// # Errors
    ///
    /// Returns [`DualError::ShapeMismatch`] if the batch sizes differ and
    /// neither of them is 1.
    pub fn compose(&self, other: &Displacement) -> Result<Self, DualError> {
        if self.len() != other.len() && self.len() != 1 && other.len() != 1 {
            return Err(DualError::shape_mismatch(self.len(), other.len()));
        }
        Ok(Self(&self.0 * &other.0))
    }

    /// Apply the displacement to an Nx3 array of points with `self * p * self.conj3()`.
    ///
    /// A single displacement is applied to every point; a batch of
    /// displacements is applied point by point.
    pub fn transform_points(&self, points: &Array2<f64>) -> Result<Array2<f64>, DualError> {
        if self.len() != 1 && self.len() != points.nrows() {
            return Err(DualError::shape_mismatch(self.len(), points.nrows()));
        }
        let p = DQPoint::from_points(points)?;
        let moved = &(&self.0 * &*p) * &self.0.conj3();
        Ok(moved.qd().vect())
    }

    /// Unwrap into the underlying dual quaternion batch.
    pub fn into_inner(self) -> DualQuaternion {
        self.0
    }
}

impl Default for Displacement {
    fn default() -> Self {
        Self::identity(1)
    }
}

impl Deref for Displacement {
    type Target = DualQuaternion;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Displacement> for DualQuaternion {
    #[inline]
    fn from(d: Displacement) -> Self {
        d.0
    }
}

/// Composition, see [`Displacement::compose`].
///
/// # Panics
///
/// Panics if the batch sizes differ and neither of them is 1.
impl Mul for &Displacement {
    type Output = Displacement;

    fn mul(self, rhs: &Displacement) -> Self::Output {
        Displacement(&self.0 * &rhs.0)
    }
}
