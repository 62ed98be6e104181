//! Attach transform extraction between anchor frames.

use nalgebra::{Matrix3, Matrix4, Point3};
use rig_types::AttachMode;

use crate::error::{AttachError, AttachResult};
use crate::frame::{build_frame3, build_frame3_scaled, validate_frame3, EPSILON};

/// Compute the attach transform mapping a `from` anchor triple onto a `to`
/// anchor triple.
///
/// Rigid mode works on normalized frames and keeps rotation + translation
/// only. Uniform and affine modes work on scale-carrying frames; uniform
/// re-extracts a single scale factor, affine returns the full mapping,
/// shear included.
///
/// Both triples are validated before any matrix work. Given identical
/// inputs the output is bit-identical: the SVD convention is fixed and
/// nothing here iterates or randomizes.
///
/// # Errors
///
/// Degenerate triples fail with the [`frame errors`](crate::AttachError);
/// uniform mode fails with [`AttachError::DegenerateTransform`] on a
/// near-zero determinant.
///
/// # Example
///
/// ```
/// use nalgebra::{Matrix4, Point3};
/// use rig_attach::compute_attach_transform;
/// use rig_types::AttachMode;
///
/// let triple = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let t = compute_attach_transform(&triple, &triple, AttachMode::Rigid).unwrap();
/// assert_eq!(t, Matrix4::identity());
/// ```
pub fn compute_attach_transform(
    from: &[Point3<f64>; 3],
    to: &[Point3<f64>; 3],
    mode: AttachMode,
) -> AttachResult<Matrix4<f64>> {
    validate_frame3(&from[0], &from[1], &from[2])?;
    validate_frame3(&to[0], &to[1], &to[2])?;

    match mode {
        AttachMode::Rigid => {
            let from_frame = build_frame3(&from[0], &from[1], &from[2])?;
            let to_frame = build_frame3(&to[0], &to[1], &to[2])?;
            let t = to_frame * invert_frame(&from_frame)?;
            extract_rigid(&t)
        }
        AttachMode::Uniform => {
            let from_frame = build_frame3_scaled(&from[0], &from[1], &from[2])?;
            let to_frame = build_frame3_scaled(&to[0], &to[1], &to[2])?;
            let t = to_frame * invert_frame(&from_frame)?;
            extract_uniform(&t)
        }
        AttachMode::Affine => {
            let from_frame = build_frame3_scaled(&from[0], &from[1], &from[2])?;
            let to_frame = build_frame3_scaled(&to[0], &to[1], &to[2])?;
            Ok(to_frame * invert_frame(&from_frame)?)
        }
    }
}

fn invert_frame(frame: &Matrix4<f64>) -> AttachResult<Matrix4<f64>> {
    frame.try_inverse().ok_or(AttachError::DegenerateTransform {
        det: frame.fixed_view::<3, 3>(0, 0).determinant(),
    })
}

/// Keep rotation + translation, discard scale and shear.
fn extract_rigid(t: &Matrix4<f64>) -> AttachResult<Matrix4<f64>> {
    let upper = t.fixed_view::<3, 3>(0, 0).into_owned();
    let rotation = polar_rotation(&upper)?;
    Ok(recompose(&rotation, t))
}

/// Keep rotation + translation + uniform scale.
fn extract_uniform(t: &Matrix4<f64>) -> AttachResult<Matrix4<f64>> {
    let upper = t.fixed_view::<3, 3>(0, 0).into_owned();
    let det = upper.determinant();
    let scale = det.abs().cbrt();
    if scale < EPSILON {
        return Err(AttachError::DegenerateTransform { det });
    }

    let normalized = upper / scale;
    let rotation = polar_rotation(&normalized)?;
    Ok(recompose(&(rotation * scale), t))
}

/// Nearest proper rotation via SVD polar decomposition.
///
/// Reflection branch: if `det(U * V^T) < 0`, the last column of `U` is
/// negated before recomposing. This is the one sign choice in the whole
/// pipeline; it must stay as written for outputs to be reproducible.
fn polar_rotation(m: &Matrix3<f64>) -> AttachResult<Matrix3<f64>> {
    let svd = m.svd(true, true);
    let mut u = svd.u.ok_or(AttachError::SvdFailed)?;
    let v_t = svd.v_t.ok_or(AttachError::SvdFailed)?;

    let mut rotation = u * v_t;
    if rotation.determinant() < 0.0 {
        for i in 0..3 {
            u[(i, 2)] = -u[(i, 2)];
        }
        rotation = u * v_t;
    }

    Ok(rotation)
}

fn recompose(block: &Matrix3<f64>, t: &Matrix4<f64>) -> Matrix4<f64> {
    let mut result = Matrix4::identity();
    result.fixed_view_mut::<3, 3>(0, 0).copy_from(block);
    result
        .fixed_view_mut::<3, 1>(0, 3)
        .copy_from(&t.fixed_view::<3, 1>(0, 3).into_owned());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn triple(p1: [f64; 3], p2: [f64; 3], p3: [f64; 3]) -> [Point3<f64>; 3] {
        [Point3::from(p1), Point3::from(p2), Point3::from(p3)]
    }

    fn unit_triple() -> [Point3<f64>; 3] {
        triple([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])
    }

    #[test]
    fn test_rigid_pure_translation() {
        let to = triple([5.0, 0.0, 0.0], [6.0, 0.0, 0.0], [5.0, 1.0, 0.0]);
        let t = compute_attach_transform(&unit_triple(), &to, AttachMode::Rigid).unwrap();

        assert_relative_eq!(
            t.fixed_view::<3, 3>(0, 0).into_owned(),
            Matrix3::identity(),
            epsilon = 1e-10
        );
        assert_relative_eq!(
            Vector3::from(t.fixed_view::<3, 1>(0, 3)),
            Vector3::new(5.0, 0.0, 0.0),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_uniform_pure_translation() {
        let to = triple([5.0, 0.0, 0.0], [6.0, 0.0, 0.0], [5.0, 1.0, 0.0]);
        let t = compute_attach_transform(&unit_triple(), &to, AttachMode::Uniform).unwrap();

        assert_relative_eq!(
            t.fixed_view::<3, 3>(0, 0).into_owned(),
            Matrix3::identity(),
            epsilon = 1e-10
        );
        assert_relative_eq!(
            Vector3::from(t.fixed_view::<3, 1>(0, 3)),
            Vector3::new(5.0, 0.0, 0.0),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_rigid_round_trip_is_identity() {
        let t = compute_attach_transform(&unit_triple(), &unit_triple(), AttachMode::Rigid)
            .unwrap();
        assert_relative_eq!(t, Matrix4::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_rigid_discards_scale() {
        let to = triple([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
        let t = compute_attach_transform(&unit_triple(), &to, AttachMode::Rigid).unwrap();

        let det = t.fixed_view::<3, 3>(0, 0).determinant();
        assert_relative_eq!(det.abs(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_uniform_extracts_scale() {
        let to = triple([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
        let t = compute_attach_transform(&unit_triple(), &to, AttachMode::Uniform).unwrap();

        let det = t.fixed_view::<3, 3>(0, 0).determinant();
        assert_relative_eq!(det.abs().cbrt(), 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_affine_maps_origin_exactly() {
        let to = triple([10.0, 0.0, 0.0], [12.0, 0.0, 0.0], [10.0, 3.0, 0.0]);
        let t = compute_attach_transform(&unit_triple(), &to, AttachMode::Affine).unwrap();

        let mapped = t * Point3::origin().to_homogeneous();
        assert_relative_eq!(mapped.x, 10.0, epsilon = 1e-10);
        assert_relative_eq!(mapped.y, 0.0, epsilon = 1e-10);
        assert_relative_eq!(mapped.z, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_rigid_rotation_about_y() {
        // X maps onto -Z.
        let to = triple([0.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]);
        let t = compute_attach_transform(&unit_triple(), &to, AttachMode::Rigid).unwrap();

        let x_dir = t.fixed_view::<3, 3>(0, 0) * Vector3::x();
        assert_relative_eq!(x_dir, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-10);
    }

    #[test]
    fn test_bitwise_determinism() {
        let from = triple([1.0, 2.0, 3.0], [4.0, 2.0, 3.0], [1.0, 5.0, 3.0]);
        let to = triple([10.0, 0.0, 0.0], [11.0, 0.0, 0.0], [10.0, 1.0, 0.0]);

        for mode in [AttachMode::Rigid, AttachMode::Uniform, AttachMode::Affine] {
            let t1 = compute_attach_transform(&from, &to, mode).unwrap();
            let t2 = compute_attach_transform(&from, &to, mode).unwrap();
            assert_eq!(t1, t2);
        }
    }

    #[test]
    fn test_collinear_from_rejected() {
        let from = triple([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let result = compute_attach_transform(&from, &unit_triple(), AttachMode::Rigid);
        assert!(matches!(
            result,
            Err(AttachError::CollinearFramePoints { .. })
        ));
    }

    #[test]
    fn test_collinear_to_rejected() {
        let to = triple([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let result = compute_attach_transform(&unit_triple(), &to, AttachMode::Rigid);
        assert!(matches!(
            result,
            Err(AttachError::CollinearFramePoints { .. })
        ));
    }

    #[test]
    fn test_reflection_branch_yields_proper_rotation() {
        // A from/to pair that mirrors across the YZ plane would hand the
        // polar step a reflection; the corrected result must still be a
        // proper rotation.
        let from = triple([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let to = triple([0.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let t = compute_attach_transform(&from, &to, AttachMode::Rigid).unwrap();

        let det = t.fixed_view::<3, 3>(0, 0).determinant();
        assert_relative_eq!(det, 1.0, epsilon = 1e-10);
    }
}
