//! Mesh, armature, and binding payload types.
//!
//! These types carry the geometry and skeleton data that composition places
//! and that baking rewrites. Tessellation, skin evaluation, and export all
//! happen outside this workspace; here the payload only needs to be cloned,
//! transformed, and handed on.

use hashbrown::HashMap;
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Primitive shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PrimitiveKind {
    /// Axis-aligned box.
    Box,
    /// UV sphere.
    Sphere,
    /// Cylinder along local Y.
    Cylinder,
    /// Capsule along local Y.
    Capsule,
}

/// Local placement of a primitive inside its mesh.
///
/// Rotation is Euler XYZ in radians. Both fields default to "absent",
/// meaning identity; baking fills them in when it folds an instance
/// transform into the geometry.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalTransform {
    /// Translation in meters.
    #[cfg_attr(feature = "serde", serde(default))]
    pub translation: Option<[f64; 3]>,

    /// Euler XYZ rotation in radians.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotation_euler: Option<[f64; 3]>,
}

impl LocalTransform {
    /// Translation as a point, origin when absent.
    #[must_use]
    pub fn translation_point(&self) -> Point3<f64> {
        let t = self.translation.unwrap_or([0.0; 3]);
        Point3::new(t[0], t[1], t[2])
    }

    /// Euler XYZ angles, zeros when absent.
    #[must_use]
    pub fn euler_angles(&self) -> [f64; 3] {
        self.rotation_euler.unwrap_or([0.0; 3])
    }
}

/// A single parametric primitive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Primitive {
    /// Shape kind.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: PrimitiveKind,

    /// Primitive id, unique within the part.
    pub id: String,

    /// Optional display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,

    /// Shape dimensions in meters, keyed by parameter name
    /// (`x`/`y`/`z`, `radius`, `height`, ...).
    pub dimensions: HashMap<String, f64>,

    /// Local placement within the mesh.
    #[cfg_attr(feature = "serde", serde(default))]
    pub transform: Option<LocalTransform>,

    /// Material name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub material: Option<String>,
}

/// A named group of primitives.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    /// Mesh id, unique within the part.
    pub id: String,

    /// Optional display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,

    /// Primitives making up this mesh.
    pub primitives: Vec<Primitive>,
}

/// A single bone in an armature.
///
/// `parent` is another bone id, or `"none"` for a root bone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bone {
    /// Bone id, unique within the armature.
    pub id: String,

    /// Parent bone id, or `"none"`.
    pub parent: String,

    /// Head position in part-local space, meters.
    pub head: [f64; 3],

    /// Tail position in part-local space, meters.
    pub tail: [f64; 3],

    /// Roll about the bone axis, radians.
    #[cfg_attr(feature = "serde", serde(default))]
    pub roll: f64,
}

impl Bone {
    /// Head as a point.
    #[must_use]
    pub fn head_point(&self) -> Point3<f64> {
        Point3::new(self.head[0], self.head[1], self.head[2])
    }

    /// Tail as a point.
    #[must_use]
    pub fn tail_point(&self) -> Point3<f64> {
        Point3::new(self.tail[0], self.tail[1], self.tail[2])
    }
}

/// A bone hierarchy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Armature {
    /// Armature id, unique within the part.
    pub id: String,

    /// Optional display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,

    /// Bones, parents before children.
    pub bones: Vec<Bone>,
}

/// Weight of one bone on a primitive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoneWeight {
    /// Bone id within the bound armature.
    pub bone_id: String,

    /// Normalized weight.
    pub weight: f64,
}

/// Per-primitive skin weights.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrimitiveWeights {
    /// Primitive id within the bound mesh.
    pub primitive_id: String,

    /// Bone weights for this primitive.
    pub bones: Vec<BoneWeight>,
}

/// A mesh-to-armature skin binding.
///
/// Opaque to composition: baking copies bindings through unchanged, the
/// external skinning pass resolves them per vertex.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binding {
    /// Bound mesh id.
    pub mesh_id: String,

    /// Bound armature id.
    pub armature_id: String,

    /// Per-primitive weight tables.
    pub weights: Vec<PrimitiveWeights>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_transform_defaults() {
        let t = LocalTransform::default();
        assert_eq!(t.translation_point(), Point3::origin());
        assert_eq!(t.euler_angles(), [0.0; 3]);
    }

    #[test]
    fn test_bone_points() {
        let bone = Bone {
            id: "root".to_string(),
            parent: "none".to_string(),
            head: [0.0, 0.0, 0.0],
            tail: [0.0, 1.0, 0.0],
            roll: 0.0,
        };
        assert_eq!(bone.head_point(), Point3::origin());
        assert_eq!(bone.tail_point(), Point3::new(0.0, 1.0, 0.0));
    }
}
