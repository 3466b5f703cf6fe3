use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use ndarray::Array1;
use num_traits::Float;

use crate::error::DualError;

/// Numeric payload of a [`DualNumber`], a scalar or a batch of scalars.
///
/// Arithmetic is element-wise for batches.
pub trait DualPayload:
    Clone
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Number of values carried, 1 for a scalar.
    fn len(&self) -> usize;

    /// Element-wise square root.
    fn sqrt(&self) -> Self;

    /// Element-wise reciprocal.
    fn recip(&self) -> Self;

    /// Whether any value is exactly zero.
    fn any_zero(&self) -> bool;

    /// Whether every value is strictly positive.
    fn all_positive(&self) -> bool;
}

macro_rules! impl_scalar_payload {
    ($t:ty) => {
        impl DualPayload for $t {
            #[inline]
            fn len(&self) -> usize {
                1
            }

            #[inline]
            fn sqrt(&self) -> Self {
                <$t>::sqrt(*self)
            }

            #[inline]
            fn recip(&self) -> Self {
                <$t>::recip(*self)
            }

            #[inline]
            fn any_zero(&self) -> bool {
                *self == 0.0
            }

            #[inline]
            fn all_positive(&self) -> bool {
                *self > 0.0
            }
        }
    };
}

impl_scalar_payload!(f32);
impl_scalar_payload!(f64);

impl<F: Float + fmt::Debug> DualPayload for Array1<F> {
    fn len(&self) -> usize {
        self.len()
    }

    fn sqrt(&self) -> Self {
        self.mapv(F::sqrt)
    }

    fn recip(&self) -> Self {
        self.mapv(F::recip)
    }

    fn any_zero(&self) -> bool {
        self.iter().any(|&v| v == F::zero())
    }

    fn all_positive(&self) -> bool {
        self.iter().all(|&v| v > F::zero())
    }
}

/// A dual number `r + e d` with `e^2 = 0`.
///
/// ```text
/// x1 + x2 = r1 + r2 + e (d1 + d2)
/// x1 * x2 = r1 r2 + e (r1 d2 + d1 r2)
/// 1 / x   = 1 / r - e d / r^2
/// ```
///
/// Example:
///
/// ```
/// use quaternions_dual::DualNumber;
///
/// let x = DualNumber::new(4.0, 2.0).unwrap();
/// let s = x.sqrt().unwrap();
/// assert_eq!((s.r(), s.d()), (&2.0, &0.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DualNumber<T> {
    r: T,
    d: T,
}

impl<T: DualPayload> DualNumber<T> {
    /// Create a dual number from its real and dual parts.
    ///
    /// # Errors
    ///
    /// Returns [`DualError::ShapeMismatch`] if the parts carry a different number of values.
    pub fn new(r: T, d: T) -> Result<Self, DualError> {
        if r.len() != d.len() {
            return Err(DualError::shape_mismatch(r.len(), d.len()));
        }
        Ok(Self { r, d })
    }

    /// The real (primal) part.
    pub fn r(&self) -> &T {
        &self.r
    }

    /// The dual part.
    pub fn d(&self) -> &T {
        &self.d
    }

    /// Split into `(r, d)`.
    pub fn into_parts(self) -> (T, T) {
        (self.r, self.d)
    }

    /// Dual conjugate `r - e d`.
    pub fn conj(&self) -> Self {
        Self {
            r: self.r.clone(),
            d: -self.d.clone(),
        }
    }

    /// Multiplicative inverse `1/r - e d/r^2`.
    ///
    /// # Errors
    ///
    /// Returns [`DualError::InvalidAlgebraicState`] if the real part is zero,
    /// pure dual numbers have no inverse.
    pub fn inv(&self) -> Result<Self, DualError> {
        if self.r.any_zero() {
            return Err(DualError::InvalidAlgebraicState(
                "pure dual numbers have no inverse",
            ));
        }
        let r_inv = self.r.recip();
        Ok(Self {
            d: -(self.d.clone() * r_inv.clone() * r_inv.clone()),
            r: r_inv,
        })
    }

    /// Division `self * other^-1`.
    pub fn try_div(&self, other: &Self) -> Result<Self, DualError> {
        Ok(self.clone() * other.inv()?)
    }

    /// Square root `sqrt(r) + e d / (2 sqrt(r))` on the real branch.
    ///
    /// # Errors
    ///
    /// Returns [`DualError::InvalidAlgebraicState`] unless the real part is positive.
    pub fn sqrt(&self) -> Result<Self, DualError> {
        if !self.r.all_positive() {
            return Err(DualError::InvalidAlgebraicState(
                "square root needs a positive real part",
            ));
        }
        let s = self.r.sqrt();
        Ok(Self {
            d: self.d.clone() / (s.clone() + s.clone()),
            r: s,
        })
    }
}

impl<F: Float + fmt::Debug> DualNumber<Array1<F>> {
    /// Number of dual numbers in the batch.
    pub fn len(&self) -> usize {
        self.r.len()
    }

    /// Check if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    /// Get the dual number at `index`.
    pub fn get(&self, index: usize) -> Result<DualNumber<F>, DualError> {
        match (self.r.get(index), self.d.get(index)) {
            (Some(&r), Some(&d)) => Ok(DualNumber { r, d }),
            _ => Err(DualError::index_out_of_bounds(index, self.len())),
        }
    }

    /// Overwrite the dual number at `index`.
    pub fn set(&mut self, index: usize, value: DualNumber<F>) -> Result<(), DualError> {
        let size = self.len();
        match (self.r.get_mut(index), self.d.get_mut(index)) {
            (Some(r), Some(d)) => {
                *r = value.r;
                *d = value.d;
                Ok(())
            }
            _ => Err(DualError::index_out_of_bounds(index, size)),
        }
    }
}

impl<T: DualPayload> Neg for DualNumber<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            r: -self.r,
            d: -self.d,
        }
    }
}

impl<T: DualPayload> Add for DualNumber<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            r: self.r + rhs.r,
            d: self.d + rhs.d,
        }
    }
}

impl<T: DualPayload> Sub for DualNumber<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            r: self.r - rhs.r,
            d: self.d - rhs.d,
        }
    }
}

impl<T: DualPayload> Mul for DualNumber<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            r: self.r.clone() * rhs.r.clone(),
            d: self.r * rhs.d + self.d * rhs.r,
        }
    }
}

impl<T: fmt::Display> fmt::Display for DualNumber<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {} e", self.r, self.d)
    }
}
