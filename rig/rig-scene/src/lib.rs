//! Scene tree validation, placement solving, and world-transform composition.
//!
//! A scene spec places independently authored parts against each other
//! through slot/mount anchor triples, a discrete quarter-turn, and an
//! optional slot-relative nudge. This crate takes a
//! [`rig_types::ResolvedScene`] and produces a [`ComposedScene`]: the same
//! tree with every node carrying its local and accumulated world transform.
//!
//! - [`validate_scene`] - structural checks before any math runs
//! - [`compute_placement_transform`] - one slot/mount pairing to one
//!   local transform
//! - [`compose_scene`] - the full pre-order walk with world accumulation
//! - [`parse_distance`] - `"10cm"` / `"2in"` distance tokens to meters
//!
//! # Layer 0 Crate
//!
//! Zero Bevy dependencies, no I/O. The tree is walked with explicit
//! parent-context parameters; nothing is shared or mutated, and traversal
//! order is declaration order, so composition is deterministic down to the
//! bit.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use hashbrown::HashMap;
//! use rig_types::{
//!     Anchor, FrameRef, Part, Placement, QuarterTurn, ResolvedPart, ResolvedScene, Scene,
//!     SceneChild, SceneSpec,
//! };
//! use rig_scene::{compose_scene, validate_scene};
//!
//! let table = Arc::new(
//!     Part::new("0.2")
//!         .with_anchor(Anchor::new("top_a", [0.0, 1.0, 0.0]))
//!         .with_anchor(Anchor::new("top_b", [1.0, 1.0, 0.0]))
//!         .with_anchor(Anchor::new("top_c", [0.0, 1.0, 1.0])),
//! );
//! let lamp = Arc::new(
//!     Part::new("0.2")
//!         .with_anchor(Anchor::new("base_a", [0.0, 0.0, 0.0]))
//!         .with_anchor(Anchor::new("base_b", [1.0, 0.0, 0.0]))
//!         .with_anchor(Anchor::new("base_c", [0.0, 0.0, 1.0])),
//! );
//!
//! let spec = SceneSpec {
//!     rigs_version: "0.1".to_string(),
//!     imports: HashMap::from_iter([
//!         ("table".to_string(), "table.yaml".to_string()),
//!         ("lamp".to_string(), "lamp.yaml".to_string()),
//!     ]),
//!     scene: Scene {
//!         base: "table".to_string(),
//!         children: vec![SceneChild {
//!             id: "desk_lamp".to_string(),
//!             base: "lamp".to_string(),
//!             place: Placement {
//!                 slot: FrameRef::Anchors {
//!                     anchors: ["top_a".into(), "top_b".into(), "top_c".into()],
//!                 },
//!                 mount: FrameRef::Anchors {
//!                     anchors: ["base_a".into(), "base_b".into(), "base_c".into()],
//!                 },
//!                 rotate: QuarterTurn::Deg0,
//!                 nudge: None,
//!             },
//!             children: Vec::new(),
//!         }],
//!     },
//! };
//!
//! let scene = ResolvedScene::new(spec, "scene.yaml")
//!     .with_import("table", ResolvedPart::new(table, "table.yaml"))
//!     .with_import("lamp", ResolvedPart::new(lamp, "lamp.yaml"));
//!
//! validate_scene(&scene).unwrap();
//! let composed = compose_scene(&scene).unwrap();
//!
//! // The lamp base sits on the table top.
//! let world = composed.instances[0].world_transform;
//! assert!((world[(1, 3)] - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod compose;
mod error;
mod placement;
mod refs;
mod validation;

pub use compose::{compose_scene, ComposedScene, RigsInstance};
pub use error::{SceneError, SceneResult};
pub use placement::{compute_placement_transform, parse_distance, quarter_turn_matrix};
pub use validation::validate_scene;
