use std::fmt;
use std::ops::{Add, Deref, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};
use ndarray::{Array1, Array2};
use quaternions_core::{tolerance::allclose, QPoint, Quaternion};

use crate::{dual_number::DualNumber, error::DualError};

/// A batch of dual quaternions `qr + e qd`.
///
/// `qr` is the real (rotational) part and `qd` the dual part, which couples
/// the translation to the rotation. Both always have the same batch size.
///
/// References:
///
/// - <https://en.wikipedia.org/wiki/Dual_quaternion>
/// - L. Kavan, Real Time Skeletal Animation, 2007
#[derive(Debug, Clone, PartialEq)]
pub struct DualQuaternion {
    qr: Quaternion,
    qd: Quaternion,
}

impl DualQuaternion {
    /// Create a dual quaternion from its real and dual parts.
    ///
    /// # Errors
    ///
    /// Returns [`DualError::ShapeMismatch`] if the parts have different batch sizes.
    pub fn new(qr: Quaternion, qd: Quaternion) -> Result<Self, DualError> {
        if qr.len() != qd.len() {
            return Err(DualError::shape_mismatch(qr.len(), qd.len()));
        }
        Ok(Self { qr, qd })
    }

    /// The identity transform `1 + e 0` repeated `n` times.
    pub fn identity(n: usize) -> Self {
        Self {
            qr: Quaternion::identity(n),
            qd: Quaternion::zeros(n),
        }
    }

    /// The real part.
    pub fn qr(&self) -> &Quaternion {
        &self.qr
    }

    /// The dual part.
    pub fn qd(&self) -> &Quaternion {
        &self.qd
    }

    /// Replace the real part, keeping the dual part.
    pub fn set_qr(&mut self, qr: Quaternion) -> Result<(), DualError> {
        if qr.len() != self.len() {
            return Err(DualError::shape_mismatch(qr.len(), self.len()));
        }
        self.qr = qr;
        Ok(())
    }

    /// Replace the dual part, keeping the real part.
    pub fn set_qd(&mut self, qd: Quaternion) -> Result<(), DualError> {
        if qd.len() != self.len() {
            return Err(DualError::shape_mismatch(self.len(), qd.len()));
        }
        self.qd = qd;
        Ok(())
    }

    /// Number of dual quaternions in the batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.qr.len()
    }

    /// Check if the batch is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.qr.is_empty()
    }

    /// Get the single-element batch at `index`.
    pub fn get(&self, index: usize) -> Result<Self, DualError> {
        Ok(Self {
            qr: self.qr.get(index)?,
            qd: self.qd.get(index)?,
        })
    }

    /// Overwrite the element at `index` with the single dual quaternion `value`.
    pub fn set(&mut self, index: usize, value: &DualQuaternion) -> Result<(), DualError> {
        self.qr.set(index, &value.qr)?;
        self.qd.set(index, &value.qd)?;
        Ok(())
    }

    /// Quaternion conjugation of both parts, `conj(qr) + e conj(qd)`.
    ///
    /// Reverses products: `conj1(A B) = conj1(B) conj1(A)`.
    pub fn conj1(&self) -> Self {
        Self {
            qr: self.qr.conjugate(),
            qd: self.qd.conjugate(),
        }
    }

    /// Dual conjugation, `qr - e qd`.
    pub fn conj2(&self) -> Self {
        Self {
            qr: self.qr.clone(),
            qd: -&self.qd,
        }
    }

    /// Combined quaternion and dual conjugation, `conj(qr) - e conj(qd)`.
    ///
    /// This is the conjugation used to chain displacements on points:
    /// `dis * point * dis.conj3()`.
    pub fn conj3(&self) -> Self {
        Self {
            qr: self.qr.conjugate(),
            qd: -self.qd.conjugate(),
        }
    }

    /// Dual magnitude `sqrt(q conj1(q))` of every element.
    ///
    /// The product of a dual quaternion with its quaternion conjugate is a
    /// dual scalar; its real part is `|qr|^2`.
    ///
    /// # Errors
    ///
    /// Returns [`DualError::InvalidAlgebraicState`] if the product has a
    /// vector part or the real part is zero.
    pub fn magnitude(&self) -> Result<DualNumber<Array1<f64>>, DualError> {
        let squared = self * &self.conj1();
        if !allclose(&squared.qr.vect(), 0.0) || !allclose(&squared.qd.vect(), 0.0) {
            return Err(DualError::InvalidAlgebraicState(
                "product with the conjugate is not a dual scalar",
            ));
        }
        DualNumber::new(squared.qr.scal(), squared.qd.scal())?.sqrt()
    }
}

impl Default for DualQuaternion {
    fn default() -> Self {
        Self::identity(1)
    }
}

impl fmt::Display for DualQuaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rs, rv) = (self.qr.scal(), self.qr.vect());
        let (ds, dv) = (self.qd.scal(), self.qd.vect());
        for i in 0..self.len() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{} + {}i + {}j + {}k + ({} + {}i + {}j + {}k) e",
                rs[i],
                rv[[i, 0]],
                rv[[i, 1]],
                rv[[i, 2]],
                ds[i],
                dv[[i, 0]],
                dv[[i, 1]],
                dv[[i, 2]]
            )?;
        }
        Ok(())
    }
}

impl Neg for &DualQuaternion {
    type Output = DualQuaternion;

    fn neg(self) -> Self::Output {
        DualQuaternion {
            qr: -&self.qr,
            qd: -&self.qd,
        }
    }
}

impl Neg for DualQuaternion {
    type Output = DualQuaternion;

    fn neg(self) -> Self::Output {
        -&self
    }
}

/// Component-wise sum.
///
/// # Panics
///
/// Panics if the batch sizes differ and neither of them is 1.
impl Add for &DualQuaternion {
    type Output = DualQuaternion;

    fn add(self, rhs: &DualQuaternion) -> Self::Output {
        DualQuaternion {
            qr: &self.qr + &rhs.qr,
            qd: &self.qd + &rhs.qd,
        }
    }
}

/// Component-wise difference.
///
/// # Panics
///
/// Panics if the batch sizes differ and neither of them is 1.
impl Sub for &DualQuaternion {
    type Output = DualQuaternion;

    fn sub(self, rhs: &DualQuaternion) -> Self::Output {
        DualQuaternion {
            qr: &self.qr - &rhs.qr,
            qd: &self.qd - &rhs.qd,
        }
    }
}

/// Dual quaternion product `(qr1 + e qd1)(qr2 + e qd2) = qr1 qr2 + e (qr1 qd2 + qd1 qr2)`.
///
/// # Panics
///
/// Panics if the batch sizes differ and neither of them is 1.
impl Mul for &DualQuaternion {
    type Output = DualQuaternion;

    fn mul(self, rhs: &DualQuaternion) -> Self::Output {
        DualQuaternion {
            qr: &self.qr * &rhs.qr,
            qd: &(&self.qr * &rhs.qd) + &(&self.qd * &rhs.qr),
        }
    }
}

macro_rules! forward_owned_binop {
    ($imp:ident, $method:ident) => {
        impl $imp for DualQuaternion {
            type Output = DualQuaternion;

            #[inline]
            fn $method(self, rhs: DualQuaternion) -> Self::Output {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&DualQuaternion> for DualQuaternion {
            type Output = DualQuaternion;

            #[inline]
            fn $method(self, rhs: &DualQuaternion) -> Self::Output {
                (&self).$method(rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Mul, mul);

impl Mul<&DualQuaternion> for f64 {
    type Output = DualQuaternion;

    fn mul(self, rhs: &DualQuaternion) -> Self::Output {
        DualQuaternion {
            qr: self * &rhs.qr,
            qd: self * &rhs.qd,
        }
    }
}

impl Mul<DualQuaternion> for f64 {
    type Output = DualQuaternion;

    fn mul(self, rhs: DualQuaternion) -> Self::Output {
        self * &rhs
    }
}

impl AbsDiffEq for DualQuaternion {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        Quaternion::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.qr.abs_diff_eq(&other.qr, epsilon) && self.qd.abs_diff_eq(&other.qd, epsilon)
    }
}

impl RelativeEq for DualQuaternion {
    fn default_max_relative() -> f64 {
        Quaternion::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.qr.relative_eq(&other.qr, epsilon, max_relative)
            && self.qd.relative_eq(&other.qd, epsilon, max_relative)
    }
}

/// A batch of 3D points as dual quaternions `1 + e p`.
///
/// The real part is the unit scalar quaternion and the dual part a
/// [`QPoint`], so a transform `T` moves the points with `T * p * T.conj3()`.
#[derive(Debug, Clone, PartialEq)]
pub struct DQPoint(DualQuaternion);

impl DQPoint {
    /// Create a batch of point dual quaternions from an Nx3 point array.
    pub fn from_points(points: &Array2<f64>) -> Result<Self, DualError> {
        let qd: Quaternion = QPoint::from_points(points)?.into();
        Ok(Self(DualQuaternion {
            qr: Quaternion::identity(qd.len()),
            qd,
        }))
    }

    /// Create a single point dual quaternion.
    pub fn from_point(point: [f64; 3]) -> Self {
        Self(DualQuaternion {
            qr: Quaternion::identity(1),
            qd: QPoint::from_point(point).into(),
        })
    }

    /// The encoded points as an Nx3 array.
    pub fn points(&self) -> Array2<f64> {
        self.0.qd.vect()
    }

    /// Unwrap into the underlying dual quaternion batch.
    pub fn into_inner(self) -> DualQuaternion {
        self.0
    }
}

impl Deref for DQPoint {
    type Target = DualQuaternion;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<DQPoint> for DualQuaternion {
    #[inline]
    fn from(p: DQPoint) -> Self {
        p.0
    }
}
