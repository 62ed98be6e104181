//! Instance composition, contract validation, and transform baking.
//!
//! This crate turns a [`rig_types::ResolvedPart`] - a part plus its loaded
//! imports - into a flat [`ComposedAsset`] ready for export:
//!
//! - [`resolve_composition`] - resolve every instance into a 4x4 transform,
//!   gated by contract validation of every imported part
//! - [`validate_contract`] - check a part against its published interface
//! - [`bake_transforms`] - irreversibly fold instance transforms into
//!   deep-copied geometry, collapsing them to identity
//!
//! # Layer 0 Crate
//!
//! Zero Bevy dependencies, no I/O. Parts come in already loaded and are
//! only ever read; every output is a newly allocated value owned by the
//! caller. Composing independent assets in parallel is safe.
//!
//! # Error Policy
//!
//! Composition is all-or-nothing per asset. Every failure carries the
//! offending instance, reference, and part identifiers and propagates
//! immediately; nothing is logged, warned, or silently degraded.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use rig_types::{Anchor, Attach3, AttachMode, Instance, Part, ResolvedPart};
//! use rig_compose::resolve_composition;
//!
//! // A wheel exposing one mount triple.
//! let wheel = Arc::new(
//!     Part::new("0.2")
//!         .with_anchor(Anchor::new("mount_a", [0.0, 0.0, 0.0]))
//!         .with_anchor(Anchor::new("mount_b", [1.0, 0.0, 0.0]))
//!         .with_anchor(Anchor::new("mount_c", [0.0, 0.0, 1.0])),
//! );
//!
//! // A body that places the wheel on its front-left triple.
//! let body = Arc::new(
//!     Part::new("0.2")
//!         .with_anchor(Anchor::new("fl_a", [1.0, 0.0, 0.5]))
//!         .with_anchor(Anchor::new("fl_b", [2.0, 0.0, 0.5]))
//!         .with_anchor(Anchor::new("fl_c", [1.0, 0.0, 1.5]))
//!         .with_instance(Instance::Imported {
//!             id: "wheel_fl".to_string(),
//!             import: "wheel".to_string(),
//!             attach3: Attach3 {
//!                 from: [
//!                     "wheel.mount_a".to_string(),
//!                     "wheel.mount_b".to_string(),
//!                     "wheel.mount_c".to_string(),
//!                 ],
//!                 to: ["fl_a".to_string(), "fl_b".to_string(), "fl_c".to_string()],
//!                 mode: AttachMode::Rigid,
//!             },
//!         }),
//! );
//!
//! let resolved = ResolvedPart::new(body, "car.yaml")
//!     .with_import("wheel", ResolvedPart::new(wheel, "wheel.yaml"));
//!
//! let composed = resolve_composition(&resolved).unwrap();
//! assert_eq!(composed.instances.len(), 1);
//! assert_eq!(composed.instances[0].namespace, "wheel");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod anchors;
mod bake;
mod composer;
mod contracts;
mod error;

pub use bake::{bake_transforms, IDENTITY_ATOL};
pub use composer::{resolve_composition, ComposedAsset, ResolvedInstance};
pub use contracts::validate_contract;
pub use error::{CompositionError, CompositionResult, ContractError};
