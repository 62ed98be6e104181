//! Multi-asset scene (rigs) specs.

use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A slot or mount reference inside a placement.
///
/// Either a name published by the target part's contract, or an explicit
/// anchor triple. The two are distinct variants so a reference carrying both
/// (or neither) cannot be represented.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FrameRef {
    /// Named triple from the target part's contract `frame3_sets`.
    Named {
        /// Set name; resolved as `"{role}s.{name}"` first, bare name second.
        name: String,
    },

    /// Explicit anchor ids on the target part.
    Anchors {
        /// Exactly three anchor ids.
        anchors: [String; 3],
    },
}

/// Discrete placement rotation about the slot frame's Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QuarterTurn {
    /// No rotation.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "0deg"))]
    Deg0,
    /// Quarter turn.
    #[cfg_attr(feature = "serde", serde(rename = "90deg"))]
    Deg90,
    /// Half turn.
    #[cfg_attr(feature = "serde", serde(rename = "180deg"))]
    Deg180,
    /// Three-quarter turn.
    #[cfg_attr(feature = "serde", serde(rename = "270deg"))]
    Deg270,
}

impl QuarterTurn {
    /// The rotation angle in degrees.
    #[must_use]
    pub const fn degrees(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

/// Error returned when a rotation token is not one of the four quarter turns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid rotation '{0}' (expected 0deg, 90deg, 180deg, or 270deg)")]
pub struct UnknownRotationError(pub String);

impl FromStr for QuarterTurn {
    type Err = UnknownRotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0deg" => Ok(Self::Deg0),
            "90deg" => Ok(Self::Deg90),
            "180deg" => Ok(Self::Deg180),
            "270deg" => Ok(Self::Deg270),
            other => Err(UnknownRotationError(other.to_string())),
        }
    }
}

impl fmt::Display for QuarterTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}deg", self.degrees())
    }
}

/// A positional offset in the slot frame's local axes.
///
/// Components are distance tokens: a signed decimal with an optional
/// `cm`/`m`/`in`/`ft` suffix, bare numbers meaning meters. Token parsing and
/// unit conversion happen in the scene composer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Nudge {
    /// Offset along the slot frame's Z axis.
    #[cfg_attr(feature = "serde", serde(default = "zero_token"))]
    pub north: String,

    /// Offset along the slot frame's X axis.
    #[cfg_attr(feature = "serde", serde(default = "zero_token"))]
    pub east: String,

    /// Offset along the slot frame's Y axis.
    #[cfg_attr(feature = "serde", serde(default = "zero_token"))]
    pub up: String,
}

fn zero_token() -> String {
    "0".to_string()
}

impl Default for Nudge {
    fn default() -> Self {
        Self {
            north: zero_token(),
            east: zero_token(),
            up: zero_token(),
        }
    }
}

/// How one child part attaches to its parent in a scene.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Parent-side anchor triple.
    pub slot: FrameRef,

    /// Child-side anchor triple.
    pub mount: FrameRef,

    /// Discrete twist about the slot frame's Y axis.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotate: QuarterTurn,

    /// Optional offset in slot-local axes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nudge: Option<Nudge>,
}

/// One node of the scene tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneChild {
    /// Instance id, unique across the whole tree.
    pub id: String,

    /// Import alias of the part this node places.
    pub base: String,

    /// Placement against the parent node's part.
    pub place: Placement,

    /// Child nodes, placed against this node's part.
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<SceneChild>,
}

/// The scene tree root.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scene {
    /// Import alias of the root part.
    pub base: String,

    /// Top-level children, placed against the root part.
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<SceneChild>,
}

/// A complete scene composition spec.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneSpec {
    /// Scene schema version.
    pub rigs_version: String,

    /// Part sources keyed by alias.
    #[cfg_attr(feature = "serde", serde(default))]
    pub imports: HashMap<String, String>,

    /// The placement tree.
    pub scene: Scene,
}
