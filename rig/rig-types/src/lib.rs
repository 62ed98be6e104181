//! Core data model for RigForge part and scene composition.
//!
//! This crate provides the foundational types shared by the composition
//! crates:
//!
//! - [`Part`] - A complete rigged asset: meshes, armatures, bindings, anchors
//! - [`Anchor`] - A named 3D point exposed for external attachment
//! - [`Attach3`] - A 3-anchor correspondence directive between two parts
//! - [`Contract`] - A part's published guarantee of anchors and anchor triples
//! - [`SceneSpec`] - A multi-asset scene tree of slot/mount placements
//! - [`ResolvedPart`] / [`ResolvedScene`] - Loader outputs handed to composition
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Python bindings
//!
//! # Units
//!
//! All coordinates are `f64` meters. Scene placement accepts distance tokens
//! with `cm`/`m`/`in`/`ft` suffixes; those are converted to meters by the
//! scene composer, never stored.
//!
//! # Coordinate System
//!
//! Right-handed, Y up, -Z forward. Anchor frames built from these types are
//! orthonormal and right-handed by construction.
//!
//! # Ownership
//!
//! Parts are immutable once loaded and shared by [`std::sync::Arc`] across
//! composition passes. Composition never mutates a part; baking deep-copies.
//!
//! # Features
//!
//! - `serde` - Serialize/Deserialize derives matching the on-disk YAML shapes
//!   (the YAML layer itself lives outside this workspace)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod anchor;
mod contract;
mod geometry;
mod part;
mod resolved;
mod scene;

pub use anchor::Anchor;
pub use contract::Contract;
pub use geometry::{
    Armature, Binding, Bone, BoneWeight, LocalTransform, Mesh, Primitive, PrimitiveKind,
    PrimitiveWeights,
};
pub use part::{Attach3, AttachMode, ImportDef, Instance, Part, UnknownModeError};
pub use resolved::{ResolvedPart, ResolvedScene};
pub use scene::{
    FrameRef, Nudge, Placement, QuarterTurn, Scene, SceneChild, SceneSpec, UnknownRotationError,
};

// Re-export commonly used math types for convenience
pub use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
