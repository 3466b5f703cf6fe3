#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Batched quaternions, dual numbers, dual quaternions and rigid displacements.

#[doc(inline)]
pub use quaternions_core as quaternion;

#[doc(inline)]
pub use quaternions_dual as dual;

pub use quaternions_core::{QPoint, Quaternion, QuaternionError};
pub use quaternions_dual::{
    DQPoint, Displacement, DualError, DualNumber, DualPayload, DualQuaternion,
};
