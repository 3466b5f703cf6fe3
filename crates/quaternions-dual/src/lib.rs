#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Dual algebra
//!
//! - [`DualNumber`]: `r + e d` with `e^2 = 0`, over scalars or batches.
//! - [`DualQuaternion`]: `qr + e qd`, a pair of quaternion batches.
//! - [`DQPoint`]: 3D points as dual quaternions.
//! - [`Displacement`]: rigid transforms built from a rotation and a translation.
//!
//! ## Example
//!
//! ```rust
//! use ndarray::array;
//! use quaternions_core::Quaternion;
//! use quaternions_dual::Displacement;
//!
//! let half = std::f64::consts::FRAC_PI_4;
//! let rotation = Quaternion::from_parts(half.cos(), 0.0, 0.0, half.sin());
//! let dis = Displacement::from_rotation_translation(&rotation, &array![[1.0, 0.0, 0.0]]).unwrap();
//!
//! let moved = dis.transform_points(&array![[1.0, 0.0, 0.0]]).unwrap();
//! ```

/// Displacements, rigid transforms as constrained dual quaternions.
pub mod displacement;

/// Dual number algebra.
pub mod dual_number;

/// Dual quaternion algebra and dual quaternion points.
pub mod dual_quaternion;

/// Error types for dual algebra.
pub mod error;

pub use displacement::Displacement;
pub use dual_number::{DualNumber, DualPayload};
pub use dual_quaternion::{DQPoint, DualQuaternion};
pub use error::DualError;
