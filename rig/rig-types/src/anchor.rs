//! Anchors: named attachment points on a part.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named 3D point exposed by a part for external attachment.
///
/// Anchors are the only geometry a part exposes across its boundary: every
/// attach directive and scene placement references parts purely through
/// anchor ids. Ids are unique within a part.
///
/// # Example
///
/// ```
/// use rig_types::Anchor;
///
/// let anchor = Anchor::new("hub_center", [0.0, 0.12, 0.0]);
/// assert_eq!(anchor.id, "hub_center");
/// assert_eq!(anchor.position().y, 0.12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anchor {
    /// Anchor id, unique within the owning part.
    pub id: String,

    /// Position in the part's local space, meters.
    pub translation: [f64; 3],
}

impl Anchor {
    /// Create a new anchor.
    #[must_use]
    pub fn new(id: impl Into<String>, translation: [f64; 3]) -> Self {
        Self {
            id: id.into(),
            translation,
        }
    }

    /// Position as a point.
    #[must_use]
    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.translation[0], self.translation[1], self.translation[2])
    }
}
