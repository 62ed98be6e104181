//! Transform baking: fold instance transforms into part geometry.

use std::sync::Arc;

use nalgebra::Matrix4;
use rig_attach::{euler_xyz_from_matrix, matrix_from_euler_xyz};
use rig_types::{LocalTransform, Part};
use tracing::debug;

use crate::composer::{ComposedAsset, ResolvedInstance};

/// Tolerance below which an instance transform counts as identity and is
/// passed through unbaked.
pub const IDENTITY_ATOL: f64 = 1e-12;

/// Fold every non-identity instance transform into its part's geometry.
///
/// Produces a new [`ComposedAsset`] in which each baked instance carries a
/// deep-copied part whose primitives and bones have been moved into the
/// root part's space, and whose transform is identity. The input asset and
/// the original parts are left untouched. Local-mesh instances (no source
/// part) pass through unchanged, as do instances already at identity -
/// the skip is an optimization, baking an identity transform would be a
/// no-op anyway.
///
/// Baking is irreversible: once folded, the placement can no longer be
/// separated from the geometry.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rig_types::{Part, ResolvedPart};
/// use rig_compose::{bake_transforms, resolve_composition};
///
/// let part = Arc::new(Part::new("0.2"));
/// let composed = resolve_composition(&ResolvedPart::new(part, "x.yaml")).unwrap();
/// let baked = bake_transforms(&composed);
/// assert!(baked.instances.is_empty());
/// ```
#[must_use]
pub fn bake_transforms(composed: &ComposedAsset) -> ComposedAsset {
    let instances = composed
        .instances
        .iter()
        .map(|instance| match &instance.source {
            Some(part) if !is_identity(&instance.transform) => {
                debug!(instance = %instance.id, "baking instance transform");
                ResolvedInstance {
                    id: instance.id.clone(),
                    source: Some(Arc::new(bake_part(part, &instance.transform))),
                    transform: Matrix4::identity(),
                    namespace: instance.namespace.clone(),
                    mesh_id: instance.mesh_id.clone(),
                }
            }
            _ => instance.clone(),
        })
        .collect();

    ComposedAsset {
        root: Arc::clone(&composed.root),
        instances,
    }
}

/// Deep-copy a part with an instance transform applied to its geometry.
fn bake_part(part: &Part, transform: &Matrix4<f64>) -> Part {
    let mut baked = part.clone();
    let rotation = transform.fixed_view::<3, 3>(0, 0).into_owned();

    for mesh in &mut baked.meshes {
        for primitive in &mut mesh.primitives {
            let local = primitive.transform.clone().unwrap_or_default();

            let local_rotation = matrix_from_euler_xyz(local.euler_angles());
            let combined = rotation * local_rotation;

            let translated = transform * local.translation_point().to_homogeneous();

            primitive.transform = Some(LocalTransform {
                translation: Some([translated.x, translated.y, translated.z]),
                rotation_euler: Some(euler_xyz_from_matrix(&combined)),
            });
        }
    }

    for armature in &mut baked.armatures {
        for bone in &mut armature.bones {
            let head = transform * bone.head_point().to_homogeneous();
            let tail = transform * bone.tail_point().to_homogeneous();
            bone.head = [head.x, head.y, head.z];
            bone.tail = [tail.x, tail.y, tail.z];
        }
    }

    baked
}

fn is_identity(transform: &Matrix4<f64>) -> bool {
    let identity = Matrix4::identity();
    transform
        .iter()
        .zip(identity.iter())
        .all(|(a, b): (&f64, &f64)| (a - b).abs() <= IDENTITY_ATOL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use rig_types::{Armature, Bone};

    fn translation(v: Vector3<f64>) -> Matrix4<f64> {
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&v);
        m
    }

    fn part_with_bone() -> Part {
        let mut part = Part::new("0.2");
        part.armatures.push(Armature {
            id: "arm".to_string(),
            name: None,
            bones: vec![Bone {
                id: "root".to_string(),
                parent: "none".to_string(),
                head: [0.0, 0.0, 0.0],
                tail: [0.0, 1.0, 0.0],
                roll: 0.0,
            }],
        });
        part
    }

    #[test]
    fn test_is_identity_tolerance() {
        assert!(is_identity(&Matrix4::identity()));
        assert!(!is_identity(&translation(Vector3::new(1e-6, 0.0, 0.0))));
    }

    #[test]
    fn test_bake_moves_bones() {
        let baked = bake_part(
            &part_with_bone(),
            &translation(Vector3::new(1.0, 0.0, 0.5)),
        );

        let bone = &baked.armatures[0].bones[0];
        assert_relative_eq!(bone.head_point().x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(bone.head_point().z, 0.5, epsilon = 1e-12);
        assert_relative_eq!(bone.tail_point().y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bake_does_not_mutate_original() {
        let part = part_with_bone();
        let _ = bake_part(&part, &translation(Vector3::new(1.0, 0.0, 0.0)));
        assert_eq!(part.armatures[0].bones[0].head, [0.0, 0.0, 0.0]);
    }
}
