use ndarray::{ArrayBase, Data, Dimension};

/// Relative tolerance of [`allclose`].
pub const ALLCLOSE_RTOL: f64 = 1e-5;

/// Absolute tolerance of [`allclose`].
pub const ALLCLOSE_ATOL: f64 = 1e-8;

/// Check that `value` is close to `expected`.
///
/// Uses `|value - expected| <= ALLCLOSE_ATOL + ALLCLOSE_RTOL * |expected|`.
#[inline]
pub fn isclose(value: f64, expected: f64) -> bool {
    (value - expected).abs() <= ALLCLOSE_ATOL + ALLCLOSE_RTOL * expected.abs()
}

/// Check that every value of `values` is close to `expected`, see [`isclose`].
///
/// Example:
///
/// ```
/// use ndarray::array;
/// use quaternions_core::tolerance::allclose;
///
/// assert!(allclose(&array![1.0, 1.0 + 1e-9], 1.0));
/// assert!(!allclose(&array![1.0, 2.0], 1.0));
/// ```
pub fn allclose<S, D>(values: &ArrayBase<S, D>, expected: f64) -> bool
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    values.iter().all(|&v| isclose(v, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};

    #[test]
    fn test_isclose_relative() {
        assert!(isclose(1000.0 + 1e-3, 1000.0));
        assert!(!isclose(1000.0 + 1e-1, 1000.0));
    }

    #[test]
    fn test_allclose_zero() {
        assert!(allclose(&array![0.0, 1e-9, -1e-9], 0.0));
        assert!(!allclose(&array![1e-6], 0.0));
    }

    #[test]
    fn test_allclose_empty() {
        assert!(allclose(&Array1::<f64>::zeros(0), 3.0));
    }

    #[test]
    fn test_allclose_matrix() {
        assert!(allclose(&Array2::<f64>::ones((2, 3)), 1.0));
        assert!(!allclose(&Array2::<f64>::eye(3), 1.0));
    }
}
