#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Quaternions
//!
//! A [`Quaternion`] holds a batch of N quaternions `w + xi + yj + zk`, each
//! packed as two complex numbers `a = w + xi` and `b = y + zi`. Every
//! operation works element-wise over the batch.
//!
//! ## Example
//!
//! ```rust
//! use quaternions_core::{QPoint, Quaternion};
//!
//! // quarter turn about z
//! let half = std::f64::consts::FRAC_PI_4;
//! let r = Quaternion::from_parts(half.cos(), 0.0, 0.0, half.sin());
//!
//! let p = QPoint::from_point([1.0, 0.0, 0.0]);
//! let rotated = &(&r * &*p) * &r.conjugate();
//! ```

/// Error types for quaternion operations.
pub mod error;

/// Pure quaternions encoding 3D points.
pub mod qpoint;

/// Batched quaternion algebra.
pub mod quaternion;

/// Numeric tolerances shared by the validity checks.
pub mod tolerance;

pub use error::QuaternionError;
pub use qpoint::QPoint;
pub use quaternion::Quaternion;
