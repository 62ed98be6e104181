//! Anchor-frame construction and attach transform extraction.
//!
//! This crate does the geometric heavy lifting of composition: it turns
//! 3-anchor correspondences into 4x4 placement transforms.
//!
//! - [`build_frame3`] - orthonormal frame from three anchor points
//! - [`build_frame3_scaled`] - scale-carrying variant for uniform/affine modes
//! - [`compute_attach_transform`] - frame-to-frame transform at a chosen
//!   fidelity ([`rig_types::AttachMode`])
//! - [`euler_xyz_from_matrix`] / [`matrix_from_euler_xyz`] - Euler XYZ
//!   round-tripping with gimbal-lock handling, used by transform baking
//!
//! # Layer 0 Crate
//!
//! Zero Bevy dependencies, no I/O, no shared state. Every function is a pure
//! computation over a fixed-size input.
//!
//! # Determinism
//!
//! Identical inputs produce bit-identical outputs. The SVD reflection
//! branch is pinned (negate the last column of `U` when `det < 0`) and no
//! step iterates, randomizes, or reduces in unordered fashion. Callers
//! compose these transforms into exported scene bytes, so this is a
//! correctness requirement, not a nicety.
//!
//! # Quick Start
//!
//! ```
//! use nalgebra::Point3;
//! use rig_attach::compute_attach_transform;
//! use rig_types::AttachMode;
//!
//! // Anchor triples on two parts, no shared coordinate convention.
//! let wheel = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ];
//! let body = [
//!     Point3::new(1.0, 0.0, 0.5),
//!     Point3::new(2.0, 0.0, 0.5),
//!     Point3::new(1.0, 0.0, 1.5),
//! ];
//!
//! let transform = compute_attach_transform(&wheel, &body, AttachMode::Rigid).unwrap();
//!
//! // The wheel's first anchor lands exactly on the body's first anchor.
//! let mapped = transform * Point3::new(0.0, 0.0, 0.0).to_homogeneous();
//! assert!((mapped.x - 1.0).abs() < 1e-10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod euler;
mod extract;
mod frame;

pub use error::{AttachError, AttachResult};
pub use euler::{euler_xyz_from_matrix, matrix_from_euler_xyz, GIMBAL_EPSILON};
pub use extract::compute_attach_transform;
pub use frame::{build_frame3, build_frame3_scaled, validate_frame3, EPSILON};
