//! Parts, attach directives, and instances.

use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;
use nalgebra::Point3;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Anchor, Armature, Binding, Mesh};

/// Transform fidelity for an attach directive.
///
/// Controls how much of the frame-to-frame mapping survives into the
/// instance transform:
///
/// - `Rigid` - rotation + translation only, scale and shear discarded
/// - `Uniform` - rigid plus a single uniform scale factor
/// - `Affine` - the full affine mapping, shear included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AttachMode {
    /// Rotation and translation only.
    Rigid,
    /// Rigid plus uniform scale.
    Uniform,
    /// Full affine mapping.
    Affine,
}

/// Error returned when an attach mode token is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown attach3 mode '{0}' (expected rigid, uniform, or affine)")]
pub struct UnknownModeError(pub String);

impl FromStr for AttachMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rigid" => Ok(Self::Rigid),
            "uniform" => Ok(Self::Uniform),
            "affine" => Ok(Self::Affine),
            other => Err(UnknownModeError(other.to_string())),
        }
    }
}

impl fmt::Display for AttachMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Rigid => "rigid",
            Self::Uniform => "uniform",
            Self::Affine => "affine",
        };
        f.write_str(s)
    }
}

/// A 3-anchor correspondence directive between two frames.
///
/// `from` names anchors on the part being placed, `to` names anchors on the
/// part it is placed into. Both sides must reference exactly three
/// non-degenerate anchors; the composer turns the two triples into one
/// transform at the requested fidelity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attach3 {
    /// Source anchor references (on the placed part).
    pub from: [String; 3],

    /// Target anchor references (on the receiving part).
    pub to: [String; 3],

    /// Transform fidelity.
    pub mode: AttachMode,
}

/// One placement of an imported part or local mesh within a part.
///
/// The two placement kinds are distinct variants so that invalid
/// combinations (an import without an attach directive, or both an import
/// and a mesh reference) cannot be represented.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Instance {
    /// Attachment of an imported part. The attach directive is mandatory:
    /// there is no meaningful default placement across a part boundary.
    Imported {
        /// Instance id, unique within the part.
        id: String,
        /// Import alias this instance places.
        import: String,
        /// How to place it.
        attach3: Attach3,
    },

    /// Reference to one of the part's own meshes. Without an attach
    /// directive the copy sits at identity.
    Local {
        /// Instance id, unique within the part.
        id: String,
        /// Local mesh id.
        mesh_id: String,
        /// Optional placement; identity when absent.
        #[cfg_attr(feature = "serde", serde(default))]
        attach3: Option<Attach3>,
    },
}

impl Instance {
    /// Instance id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Imported { id, .. } | Self::Local { id, .. } => id,
        }
    }

    /// The attach directive, if any.
    #[must_use]
    pub fn attach3(&self) -> Option<&Attach3> {
        match self {
            Self::Imported { attach3, .. } => Some(attach3),
            Self::Local { attach3, .. } => attach3.as_ref(),
        }
    }
}

/// A part import declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImportDef {
    /// Path of the imported part definition, relative to the importing file.
    pub source: String,

    /// Optional path of a sibling contract file.
    #[cfg_attr(feature = "serde", serde(default))]
    pub contract: Option<String>,
}

/// A complete rigged asset definition.
///
/// Immutable once loaded. Composition reads parts through shared references
/// and never writes back; baking clones.
///
/// # Example
///
/// ```
/// use rig_types::{Anchor, Part};
///
/// let part = Part::new("0.2")
///     .with_anchor(Anchor::new("mount_a", [0.0, 0.0, 0.0]))
///     .with_anchor(Anchor::new("mount_b", [1.0, 0.0, 0.0]))
///     .with_anchor(Anchor::new("mount_c", [0.0, 0.0, 1.0]));
///
/// assert_eq!(part.anchors.len(), 3);
/// assert!(part.anchor_position("mount_b").is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Part {
    /// Schema version of the definition this part was loaded from.
    pub version: String,

    /// Meshes owned by this part.
    #[cfg_attr(feature = "serde", serde(default))]
    pub meshes: Vec<Mesh>,

    /// Armatures owned by this part.
    #[cfg_attr(feature = "serde", serde(default))]
    pub armatures: Vec<Armature>,

    /// Skin bindings owned by this part.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bindings: Vec<Binding>,

    /// Anchors exposed by this part.
    #[cfg_attr(feature = "serde", serde(default))]
    pub anchors: Vec<Anchor>,

    /// Import declarations, keyed by alias.
    #[cfg_attr(feature = "serde", serde(default))]
    pub imports: HashMap<String, ImportDef>,

    /// Placement instances, in declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub instances: Vec<Instance>,
}

impl Part {
    /// Create an empty part.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            meshes: Vec::new(),
            armatures: Vec::new(),
            bindings: Vec::new(),
            anchors: Vec::new(),
            imports: HashMap::new(),
            instances: Vec::new(),
        }
    }

    /// Add an anchor (builder pattern).
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchors.push(anchor);
        self
    }

    /// Add an instance (builder pattern).
    #[must_use]
    pub fn with_instance(mut self, instance: Instance) -> Self {
        self.instances.push(instance);
        self
    }

    /// Look up an anchor position by id.
    #[must_use]
    pub fn anchor_position(&self, id: &str) -> Option<Point3<f64>> {
        self.anchors.iter().find(|a| a.id == id).map(Anchor::position)
    }

    /// Anchor positions keyed by id.
    #[must_use]
    pub fn anchor_map(&self) -> HashMap<&str, Point3<f64>> {
        self.anchors
            .iter()
            .map(|a| (a.id.as_str(), a.position()))
            .collect()
    }
}
