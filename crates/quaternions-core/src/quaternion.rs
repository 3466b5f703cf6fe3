use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};
use ndarray::{Array1, Array2, Axis, Zip};
use num_complex::Complex64;
use rand::Rng;

use crate::error::QuaternionError;

/// A batch of quaternions packed as two complex components.
///
/// Each element `w + xi + yj + zk` is stored as `a = w + xi` and `b = y + zi`,
/// so that `q = a + b j`. Both arrays always have the same length, the batch
/// size N.
///
/// Example:
///
/// ```
/// use quaternions_core::Quaternion;
///
/// let q = Quaternion::from_parts(2.0, 0.0, 3.0, 0.0);
/// assert_eq!(q.scal()[0], 2.0);
/// assert!((q.magnitude()[0] - 13f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Quaternion {
    a: Array1<Complex64>,
    b: Array1<Complex64>,
}

// batches combine element-wise when their sizes match or one of them is a single element
fn assert_broadcastable(operation: &str, left: usize, right: usize) {
    assert!(
        left == right || left == 1 || right == 1,
        "cannot {operation} quaternion batches of size {left} and {right}"
    );
}

impl Quaternion {
    /// Create a single quaternion from its two packed complex components.
    pub fn new(a: Complex64, b: Complex64) -> Self {
        Self {
            a: Array1::from_elem(1, a),
            b: Array1::from_elem(1, b),
        }
    }

    /// Create a single quaternion `w + xi + yj + zk`.
    pub fn from_parts(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self::new(Complex64::new(w, x), Complex64::new(y, z))
    }

    /// Create a batch of quaternions from packed complex components.
    ///
    /// # Errors
    ///
    /// Returns [`QuaternionError::ShapeMismatch`] if `a` and `b` differ in length.
    pub fn from_batch(a: Array1<Complex64>, b: Array1<Complex64>) -> Result<Self, QuaternionError> {
        if a.len() != b.len() {
            return Err(QuaternionError::shape_mismatch(a.len(), b.len()));
        }
        Ok(Self { a, b })
    }

    /// Create a batch of quaternions from real seed values, `a = w` and `b = y`.
    pub fn from_real_batch(a: &Array1<f64>, b: &Array1<f64>) -> Result<Self, QuaternionError> {
        Self::from_batch(
            a.mapv(|v| Complex64::new(v, 0.0)),
            b.mapv(|v| Complex64::new(v, 0.0)),
        )
    }

    /// The identity quaternion `(1, 0, 0, 0)` repeated `n` times.
    pub fn identity(n: usize) -> Self {
        Self {
            a: Array1::from_elem(n, Complex64::new(1.0, 0.0)),
            b: Array1::zeros(n),
        }
    }

    /// The zero quaternion repeated `n` times.
    pub fn zeros(n: usize) -> Self {
        Self {
            a: Array1::zeros(n),
            b: Array1::zeros(n),
        }
    }

    /// Sample `n` unit quaternions uniformly over the rotation group.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut q = Self::zeros(n);
        let two_pi = 2.0 * std::f64::consts::PI;
        Zip::from(&mut q.a).and(&mut q.b).for_each(|a, b| {
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();
            let r3: f64 = rng.random();

            let w = (1.0 - r1).sqrt() * (two_pi * r2).sin();
            let x = (1.0 - r1).sqrt() * (two_pi * r2).cos();
            let y = r1.sqrt() * (two_pi * r3).sin();
            let z = r1.sqrt() * (two_pi * r3).cos();

            *a = Complex64::new(w, x);
            *b = Complex64::new(y, z);
        });
        q
    }

    /// Convert a 3x3 rotation matrix into a single unit quaternion.
    ///
    /// The branch is selected on the trace and the dominant diagonal entry so
    /// that the square root argument stays well away from zero.
    ///
    /// # Errors
    ///
    /// Returns [`QuaternionError::InvalidMatrixShape`] if `m` is not 3x3.
    pub fn from_rotation_matrix(m: &Array2<f64>) -> Result<Self, QuaternionError> {
        let (rows, cols) = m.dim();
        if (rows, cols) != (3, 3) {
            return Err(QuaternionError::InvalidMatrixShape(rows, cols));
        }

        let trace = m.diag().sum();
        let (w, x, y, z) = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            (
                0.25 * s,
                (m[[2, 1]] - m[[1, 2]]) / s,
                (m[[0, 2]] - m[[2, 0]]) / s,
                (m[[1, 0]] - m[[0, 1]]) / s,
            )
        } else if m[[0, 0]] > m[[1, 1]] && m[[0, 0]] > m[[2, 2]] {
            let s = (1.0 + m[[0, 0]] - m[[1, 1]] - m[[2, 2]]).sqrt() * 2.0;
            (
                (m[[2, 1]] - m[[1, 2]]) / s,
                0.25 * s,
                (m[[0, 1]] + m[[1, 0]]) / s,
                (m[[0, 2]] + m[[2, 0]]) / s,
            )
        } else if m[[1, 1]] > m[[2, 2]] {
            let s = (1.0 + m[[1, 1]] - m[[0, 0]] - m[[2, 2]]).sqrt() * 2.0;
            (
                (m[[0, 2]] - m[[2, 0]]) / s,
                (m[[0, 1]] + m[[1, 0]]) / s,
                0.25 * s,
                (m[[1, 2]] + m[[2, 1]]) / s,
            )
        } else {
            let s = (1.0 + m[[2, 2]] - m[[0, 0]] - m[[1, 1]]).sqrt() * 2.0;
            (
                (m[[1, 0]] - m[[0, 1]]) / s,
                (m[[0, 2]] + m[[2, 0]]) / s,
                (m[[1, 2]] + m[[2, 1]]) / s,
                0.25 * s,
            )
        };
        log::debug!("rotation matrix with trace {trace} -> ({w}, {x}, {y}, {z})");

        Ok(Self::from_parts(w, x, y, z))
    }

    /// Rotation matrices of the batch, one per element.
    ///
    /// PRECONDITION: every element is a unit quaternion.
    pub fn to_rotation_matrices(&self) -> Vec<[[f64; 3]; 3]> {
        self.a
            .iter()
            .zip(self.b.iter())
            .map(|(a, b)| {
                let (w, x, y, z) = (a.re, a.im, b.re, b.im);
                [
                    [
                        1.0 - 2.0 * (y * y + z * z),
                        2.0 * (x * y - z * w),
                        2.0 * (x * z + y * w),
                    ],
                    [
                        2.0 * (x * y + z * w),
                        1.0 - 2.0 * (x * x + z * z),
                        2.0 * (y * z - x * w),
                    ],
                    [
                        2.0 * (x * z - y * w),
                        2.0 * (y * z + x * w),
                        1.0 - 2.0 * (x * x + y * y),
                    ],
                ]
            })
            .collect()
    }

    /// Number of quaternions in the batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Check if the batch is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// The packed `w + xi` component.
    pub fn a(&self) -> &Array1<Complex64> {
        &self.a
    }

    /// The packed `y + zi` component.
    pub fn b(&self) -> &Array1<Complex64> {
        &self.b
    }

    /// Get the single-element batch at `index`.
    pub fn get(&self, index: usize) -> Result<Self, QuaternionError> {
        if index >= self.len() {
            return Err(QuaternionError::index_out_of_bounds(index, self.len()));
        }
        Ok(Self::new(self.a[index], self.b[index]))
    }

    /// Overwrite the element at `index` with the single quaternion `value`.
    pub fn set(&mut self, index: usize, value: &Quaternion) -> Result<(), QuaternionError> {
        if index >= self.len() {
            return Err(QuaternionError::index_out_of_bounds(index, self.len()));
        }
        if value.len() != 1 {
            return Err(QuaternionError::shape_mismatch(1, value.len()));
        }
        self.a[index] = value.a[0];
        self.b[index] = value.b[0];
        Ok(())
    }

    /// Scalar part `w` of every element.
    pub fn scal(&self) -> Array1<f64> {
        self.a.mapv(|a| a.re)
    }

    /// Vector part of every element as an Nx3 array of `[x, y, z]` rows.
    pub fn vect(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.len(), 3), |(i, j)| match j {
            0 => self.a[i].im,
            1 => self.b[i].re,
            _ => self.b[i].im,
        })
    }

    /// Euclidean norm of every element, `hypot(|a|, |b|)`.
    pub fn magnitude(&self) -> Array1<f64> {
        Zip::from(&self.a)
            .and(&self.b)
            .map_collect(|a, b| a.norm().hypot(b.norm()))
    }

    /// Quaternion conjugate `(conj(a), -b)`.
    pub fn conjugate(&self) -> Self {
        Self {
            a: self.a.mapv(|a| a.conj()),
            b: -&self.b,
        }
    }

    /// Scale both components by a complex scalar.
    pub fn scale_complex(&self, k: Complex64) -> Self {
        Self {
            a: &self.a * k,
            b: &self.b * k,
        }
    }

    // per-element real scaling, `k` has one entry per quaternion
    fn scale_each(&self, k: &Array1<f64>) -> Self {
        let k = k.mapv(|s| Complex64::new(s, 0.0));
        Self {
            a: &self.a * &k,
            b: &self.b * &k,
        }
    }

    /// Unit quaternions with the same direction.
    ///
    /// # Errors
    ///
    /// Returns [`QuaternionError::SingularGeometry`] if any element is zero.
    pub fn normalize(&self) -> Result<Self, QuaternionError> {
        Ok(self.polar()?.1)
    }

    /// Polar decomposition into magnitudes and unit quaternions.
    pub fn polar(&self) -> Result<(Array1<f64>, Self), QuaternionError> {
        let magnitude = self.magnitude();
        if magnitude.iter().any(|&m| m == 0.0) {
            return Err(QuaternionError::singular("polar", "zero magnitude"));
        }
        let unit = self.scale_each(&magnitude.mapv(f64::recip));
        Ok((magnitude, unit))
    }

    /// Multiplicative inverse `conj(q) / |q|^2`.
    pub fn inverse(&self) -> Result<Self, QuaternionError> {
        let squared = self.magnitude().mapv(|m| m * m);
        if squared.iter().any(|&m| m == 0.0) {
            return Err(QuaternionError::singular("inverse", "zero magnitude"));
        }
        Ok(self.conjugate().scale_each(&squared.mapv(f64::recip)))
    }

    /// Right division `self * other^-1`.
    ///
    /// The product is not commutative, so this differs from `other^-1 * self`.
    pub fn try_div(&self, other: &Quaternion) -> Result<Self, QuaternionError> {
        Ok(self * &other.inverse()?)
    }

    /// Rotation axis and angle of every element.
    ///
    /// The axis is the normalized vector part and the angle is
    /// `2 * atan2(|v|, w)`.
    ///
    /// # Errors
    ///
    /// Returns [`QuaternionError::SingularGeometry`] if a vector part is zero,
    /// the identity rotation has no axis.
    pub fn vecang(&self) -> Result<(Array2<f64>, Array1<f64>), QuaternionError> {
        let v = self.vect();
        let norms = v.map_axis(Axis(1), |row| row.dot(&row).sqrt());
        if norms.iter().any(|&n| n == 0.0) {
            return Err(QuaternionError::singular("vecang", "zero vector part"));
        }
        let axis = &v / &norms.view().insert_axis(Axis(1));
        let angle = Zip::from(&norms)
            .and(&self.a)
            .map_collect(|&s, a| 2.0 * s.atan2(a.re));
        Ok((axis, angle))
    }

    /// Quaternion logarithm `ln|q| + acos(w/|q|) v/|v|`.
    ///
    /// A zero vector part takes the real logarithm when `w > 0`.
    ///
    /// # Errors
    ///
    /// Returns [`QuaternionError::SingularGeometry`] for a zero quaternion or a
    /// negative real one, whose logarithm axis is undefined.
    pub fn log(&self) -> Result<Self, QuaternionError> {
        let singular = self.a.iter().zip(self.b.iter()).any(|(a, b)| {
            let v = a.im.hypot(b.norm());
            v == 0.0 && a.re <= 0.0
        });
        if singular {
            return Err(QuaternionError::singular("log", "non-positive real quaternion"));
        }

        let mut out = Self::zeros(self.len());
        Zip::from(&mut out.a)
            .and(&mut out.b)
            .and(&self.a)
            .and(&self.b)
            .for_each(|out_a, out_b, a, b| {
                let q = a.norm().hypot(b.norm());
                let v = a.im.hypot(b.norm());
                let k = if v == 0.0 {
                    0.0
                } else {
                    (a.re / q).clamp(-1.0, 1.0).acos() / v
                };
                *out_a = Complex64::new(q.ln(), k * a.im);
                *out_b = *b * k;
            });
        Ok(out)
    }

    /// Quaternion exponential `e^w (cos|v| + sin|v| v/|v|)`.
    pub fn exp(&self) -> Self {
        let mut out = Self::zeros(self.len());
        Zip::from(&mut out.a)
            .and(&mut out.b)
            .and(&self.a)
            .and(&self.b)
            .for_each(|out_a, out_b, a, b| {
                let ew = a.re.exp();
                let theta = a.im.hypot(b.norm());
                // sin(theta) / theta tends to 1
                let k = if theta == 0.0 {
                    1.0
                } else {
                    theta.sin() / theta
                };
                *out_a = Complex64::new(ew * theta.cos(), ew * k * a.im);
                *out_b = *b * (ew * k);
            });
        out
    }

    /// Integer power by repeated multiplication, `q.powi(0)` is the identity.
    pub fn powi(&self, n: u32) -> Self {
        (0..n).fold(Self::identity(self.len()), |acc, _| &acc * self)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity(1)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (a, b)) in self.a.iter().zip(self.b.iter()).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} + {}i + {}j + {}k", a.re, a.im, b.re, b.im)?;
        }
        Ok(())
    }
}

impl Neg for &Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Self::Output {
        Quaternion {
            a: -&self.a,
            b: -&self.b,
        }
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Self::Output {
        -&self
    }
}

/// Element-wise sum.
///
/// # Panics
///
/// Panics if the batch sizes differ and neither of them is 1.
impl Add for &Quaternion {
    type Output = Quaternion;

    fn add(self, rhs: &Quaternion) -> Self::Output {
        assert_broadcastable("add", self.len(), rhs.len());
        Quaternion {
            a: &self.a + &rhs.a,
            b: &self.b + &rhs.b,
        }
    }
}

/// Element-wise difference.
///
/// # Panics
///
/// Panics if the batch sizes differ and neither of them is 1.
impl Sub for &Quaternion {
    type Output = Quaternion;

    fn sub(self, rhs: &Quaternion) -> Self::Output {
        assert_broadcastable("subtract", self.len(), rhs.len());
        Quaternion {
            a: &self.a - &rhs.a,
            b: &self.b - &rhs.b,
        }
    }
}

/// Hamilton product in packed form, `(a1 + b1 j)(a2 + b2 j)`.
///
/// # Panics
///
/// Panics if the batch sizes differ and neither of them is 1.
impl Mul for &Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: &Quaternion) -> Self::Output {
        assert_broadcastable("multiply", self.len(), rhs.len());
        let rhs_a_conj = rhs.a.mapv(|a| a.conj());
        let rhs_b_conj = rhs.b.mapv(|b| b.conj());
        Quaternion {
            a: &(&self.a * &rhs.a) - &(&self.b * &rhs_b_conj),
            b: &(&self.a * &rhs.b) + &(&self.b * &rhs_a_conj),
        }
    }
}

macro_rules! forward_owned_binop {
    ($imp:ident, $method:ident) => {
        impl $imp for Quaternion {
            type Output = Quaternion;

            #[inline]
            fn $method(self, rhs: Quaternion) -> Self::Output {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&Quaternion> for Quaternion {
            type Output = Quaternion;

            #[inline]
            fn $method(self, rhs: &Quaternion) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl $imp<Quaternion> for &Quaternion {
            type Output = Quaternion;

            #[inline]
            fn $method(self, rhs: Quaternion) -> Self::Output {
                self.$method(&rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Mul, mul);

impl Mul<&Quaternion> for f64 {
    type Output = Quaternion;

    fn mul(self, rhs: &Quaternion) -> Self::Output {
        Quaternion {
            a: &rhs.a * self,
            b: &rhs.b * self,
        }
    }
}

impl Mul<Quaternion> for f64 {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Self::Output {
        self * &rhs
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.len() == other.len()
            && self
                .a
                .iter()
                .chain(self.b.iter())
                .zip(other.a.iter().chain(other.b.iter()))
                .all(|(l, r)| {
                    l.re.abs_diff_eq(&r.re, epsilon) && l.im.abs_diff_eq(&r.im, epsilon)
                })
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.len() == other.len()
            && self
                .a
                .iter()
                .chain(self.b.iter())
                .zip(other.a.iter().chain(other.b.iter()))
                .all(|(l, r)| {
                    l.re.relative_eq(&r.re, epsilon, max_relative)
                        && l.im.relative_eq(&r.im, epsilon, max_relative)
                })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_default_is_identity() -> Result<(), Box<dyn std::error::Error>> {
        let q = Quaternion::default();
        assert_eq!(q.len(), 1);
        assert_eq!(q.scal(), array![1.0]);
        assert_eq!(q.vect(), array![[0.0, 0.0, 0.0]]);
        assert_eq!(q.normalize()?, q);
        assert_eq!(q.conjugate(), q);
        Ok(())
    }

    #[test]
    fn test_real_seed_values() {
        let q = Quaternion::new(Complex64::new(2.0, 0.0), Complex64::new(3.0, 0.0));
        assert_eq!(q.scal(), array![2.0]);
        assert_eq!(q.vect(), array![[0.0, 3.0, 0.0]]);
        assert_relative_eq!(q.magnitude()[0], 13f64.sqrt());
    }

    #[test]
    fn test_from_batch_shape_mismatch() {
        let res = Quaternion::from_batch(Array1::zeros(3), Array1::zeros(2));
        assert_eq!(res, Err(QuaternionError::shape_mismatch(3, 2)));
    }

    #[test]
    fn test_basis_products() {
        let i = Quaternion::from_parts(0.0, 1.0, 0.0, 0.0);
        let j = Quaternion::from_parts(0.0, 0.0, 1.0, 0.0);
        let k = Quaternion::from_parts(0.0, 0.0, 0.0, 1.0);
        let minus_one = Quaternion::from_parts(-1.0, 0.0, 0.0, 0.0);

        assert_eq!(&i * &j, k);
        assert_eq!(&j * &k, i);
        assert_eq!(&k * &i, j);
        assert_eq!(&j * &i, -&k);
        assert_eq!(&i * &i, minus_one);
        assert_eq!(&(&i * &j) * &k, minus_one);
    }

    #[test]
    fn test_conjugate_product_is_scalar() {
        let mut rng = StdRng::seed_from_u64(7);
        let q = 3.0 * Quaternion::random(5, &mut rng);
        let p = &q * &q.conjugate();
        let magnitude = q.magnitude();
        assert_abs_diff_eq!(p.vect(), Array2::<f64>::zeros((5, 3)), epsilon = 1e-12);
        assert_abs_diff_eq!(p.scal(), magnitude.mapv(|m| m * m), epsilon = 1e-12);
    }

    #[test]
    fn test_associative_not_commutative() {
        let mut rng = StdRng::seed_from_u64(42);
        let q1 = Quaternion::random(4, &mut rng);
        let q2 = Quaternion::random(4, &mut rng);
        let q3 = Quaternion::random(4, &mut rng);

        let left = &(&q1 * &q2) * &q3;
        let right = &q1 * &(&q2 * &q3);
        assert_relative_eq!(left, right, epsilon = 1e-12);
        assert!(!(&q1 * &q2).abs_diff_eq(&(&q2 * &q1), 1e-6));
    }

    #[test]
    fn test_broadcast_single_element() {
        let mut rng = StdRng::seed_from_u64(1);
        let batch = Quaternion::random(3, &mut rng);
        let single = Quaternion::from_parts(0.0, 0.0, 0.0, 1.0);
        let product = &single * &batch;
        assert_eq!(product.len(), 3);
        for i in 0..3 {
            let expected = &single * &batch.get(i).unwrap();
            assert_relative_eq!(product.get(i).unwrap(), expected);
        }
    }

    #[test]
    #[should_panic]
    fn test_incompatible_batches_panic() {
        let _ = &Quaternion::identity(2) + &Quaternion::identity(3);
    }

    #[test]
    fn test_normalize() -> Result<(), Box<dyn std::error::Error>> {
        let q = Quaternion::from_real_batch(&array![3.0, 0.0], &array![4.0, 2.0])?;
        let n = q.normalize()?;
        assert_relative_eq!(n.magnitude(), array![1.0, 1.0], epsilon = 1e-12);
        assert_relative_eq!(n.scal(), array![0.6, 0.0], epsilon = 1e-12);

        let zero = Quaternion::zeros(1);
        assert!(matches!(
            zero.normalize(),
            Err(QuaternionError::SingularGeometry { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_polar() -> Result<(), Box<dyn std::error::Error>> {
        let q = Quaternion::from_parts(0.0, 0.0, 2.0, 0.0);
        let (m, u) = q.polar()?;
        assert_eq!(m, array![2.0]);
        assert_eq!(u, Quaternion::from_parts(0.0, 0.0, 1.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_get_set() -> Result<(), Box<dyn std::error::Error>> {
        let mut q = Quaternion::identity(3);
        let k = Quaternion::from_parts(0.0, 0.0, 0.0, 1.0);
        q.set(1, &k)?;
        assert_eq!(q.get(1)?, k);
        assert_eq!(q.get(0)?, Quaternion::default());
        assert_eq!(
            q.get(3),
            Err(QuaternionError::index_out_of_bounds(3, 3))
        );
        assert_eq!(
            q.set(0, &Quaternion::identity(2)),
            Err(QuaternionError::shape_mismatch(1, 2))
        );
        Ok(())
    }

    #[test]
    fn test_division() -> Result<(), Box<dyn std::error::Error>> {
        let mut rng = StdRng::seed_from_u64(3);
        let p = Quaternion::random(3, &mut rng);
        let q = 2.0 * Quaternion::random(3, &mut rng);
        let r = p.try_div(&q)?;
        assert_relative_eq!(&r * &q, p, epsilon = 1e-12);
        assert_relative_eq!(&q * &q.inverse()?, Quaternion::identity(3), epsilon = 1e-12);
        assert!(p.try_div(&Quaternion::zeros(3)).is_err());
        Ok(())
    }

    #[test]
    fn test_vecang() -> Result<(), Box<dyn std::error::Error>> {
        let half = std::f64::consts::FRAC_PI_4;
        let q = Quaternion::from_parts(half.cos(), 0.0, 0.0, half.sin());
        let (axis, angle) = q.vecang()?;
        assert_relative_eq!(axis, array![[0.0, 0.0, 1.0]], epsilon = 1e-12);
        assert_relative_eq!(angle[0], std::f64::consts::FRAC_PI_2, epsilon = 1e-12);

        assert!(Quaternion::default().vecang().is_err());
        Ok(())
    }

    #[test]
    fn test_from_rotation_matrix_branches() -> Result<(), Box<dyn std::error::Error>> {
        let mut rng = StdRng::seed_from_u64(11);
        // includes rotations by ~pi that exercise the diagonal branches
        let mut samples = Quaternion::random(16, &mut rng);
        samples.set(0, &Quaternion::from_parts(0.0, 1.0, 0.0, 0.0))?;
        samples.set(1, &Quaternion::from_parts(0.0, 0.0, 1.0, 0.0))?;
        samples.set(2, &Quaternion::from_parts(0.0, 0.0, 0.0, 1.0))?;

        for (i, r) in samples.to_rotation_matrices().iter().enumerate() {
            let m = Array2::from_shape_fn((3, 3), |(row, col)| r[row][col]);
            let q = Quaternion::from_rotation_matrix(&m)?;
            let expected = samples.get(i)?;
            // q and -q encode the same rotation
            let dot = (&q.conjugate() * &expected).scal()[0];
            let sign = if dot >= 0.0 { 1.0 } else { -1.0 };
            assert_relative_eq!(sign * &q, expected, epsilon = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_from_rotation_matrix_invalid_shape() {
        let m = Array2::<f64>::eye(4);
        assert_eq!(
            Quaternion::from_rotation_matrix(&m),
            Err(QuaternionError::InvalidMatrixShape(4, 4))
        );
    }

    #[test]
    fn test_log_exp_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let q = Quaternion::from_batch(
            array![Complex64::new(0.3, 0.2), Complex64::new(-1.0, 0.5)],
            array![Complex64::new(-0.1, 0.4), Complex64::new(0.7, 0.0)],
        )?;
        assert_relative_eq!(q.exp().log()?, q, epsilon = 1e-12);
        assert_relative_eq!(q.log()?.exp(), q, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_log_exp_real_limit() -> Result<(), Box<dyn std::error::Error>> {
        let q = Quaternion::from_parts(2.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(q.log()?, Quaternion::from_parts(2f64.ln(), 0.0, 0.0, 0.0));
        assert_relative_eq!(q.exp(), Quaternion::from_parts(2f64.exp(), 0.0, 0.0, 0.0));
        assert!(Quaternion::from_parts(-1.0, 0.0, 0.0, 0.0).log().is_err());
        assert!(Quaternion::zeros(1).log().is_err());
        Ok(())
    }

    #[test]
    fn test_powi() {
        let mut rng = StdRng::seed_from_u64(5);
        let q = Quaternion::random(2, &mut rng);
        assert_eq!(q.powi(0), Quaternion::identity(2));
        assert_eq!(q.powi(1), &Quaternion::identity(2) * &q);
        assert_relative_eq!(q.powi(2), &q * &q, epsilon = 1e-15);
        assert_relative_eq!(q.powi(3), &(&q * &q) * &q, epsilon = 1e-15);
    }

    #[test]
    fn test_scale_complex() -> Result<(), Box<dyn std::error::Error>> {
        let i = Complex64::new(0.0, 1.0);
        let q = Quaternion::from_parts(1.0, 2.0, 3.0, 4.0);
        let scaled = q.scale_complex(i);
        assert_eq!(scaled, Quaternion::from_parts(-2.0, 1.0, -4.0, 3.0));
        assert_eq!(scaled.to_string(), "-2 + 1i + -4j + 3k");

        // a real complex scalar matches the f64 premultiply
        let batch = Quaternion::from_batch(
            array![Complex64::new(1.0, -1.0), Complex64::new(0.5, 2.0)],
            array![Complex64::new(3.0, 0.0), Complex64::new(-1.0, 4.0)],
        )?;
        assert_eq!(batch.scale_complex(Complex64::new(2.0, 0.0)), 2.0 * &batch);

        let rotated = batch.scale_complex(i);
        assert_eq!(rotated.len(), 2);
        assert_eq!(rotated.get(1)?, batch.get(1)?.scale_complex(i));
        assert_eq!(
            rotated.get(1)?,
            Quaternion::from_parts(-2.0, 0.5, -4.0, -1.0)
        );
        Ok(())
    }

    #[test]
    fn test_display() {
        let q = Quaternion::from_parts(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.to_string(), "1 + 2i + 3j + 4k");
    }
}
