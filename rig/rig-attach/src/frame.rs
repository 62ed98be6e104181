//! Three-point reference frames.
//!
//! A frame is derived from three anchor points: the first is the origin, the
//! second fixes the X direction, the third pins down the XY plane. The
//! normalized variant is the orthonormal basis used for rigid placement and
//! validation; the scaled variant keeps the defining lengths so uniform and
//! affine attachment can recover scale.

use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::{AttachError, AttachResult};

/// Degeneracy threshold for frame construction.
pub const EPSILON: f64 = 1e-9;

/// Construct a normalized 4x4 affine frame from three anchor points.
///
/// Axes:
///
/// ```text
/// x_hat = normalize(p2 - p1)
/// t     = p3 - p1
/// z_hat = normalize(x_hat x t)
/// y_hat = z_hat x x_hat
/// ```
///
/// Matrix columns are `[x_hat, y_hat, z_hat, p1]`. The 3x3 block is
/// orthonormal and right-handed (determinant +1) to floating-point
/// precision.
///
/// # Errors
///
/// Returns [`AttachError::CoincidentFramePoints`] when `p1` and `p2` are
/// closer than [`EPSILON`], and [`AttachError::CollinearFramePoints`] when
/// the three points fail to span a plane. No partial frame is ever produced.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use rig_attach::build_frame3;
///
/// let frame = build_frame3(
///     &Point3::new(0.0, 0.0, 0.0),
///     &Point3::new(1.0, 0.0, 0.0),
///     &Point3::new(0.0, 1.0, 0.0),
/// )
/// .unwrap();
///
/// assert!((frame.fixed_view::<3, 3>(0, 0).determinant() - 1.0).abs() < 1e-12);
/// ```
pub fn build_frame3(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
) -> AttachResult<Matrix4<f64>> {
    validate_frame3(p1, p2, p3)?;

    let d = p2 - p1;
    let x_hat = d / d.norm();

    let t = p3 - p1;
    let cross = x_hat.cross(&t);
    let z_hat = cross / cross.norm();
    let y_hat = z_hat.cross(&x_hat);

    Ok(frame_from_columns(&x_hat, &y_hat, &z_hat, p1))
}

/// Check that three points define a non-degenerate frame.
///
/// # Errors
///
/// Same failure cases as [`build_frame3`], without building anything.
pub fn validate_frame3(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>) -> AttachResult<()> {
    let d = p2 - p1;
    let d_len = d.norm();
    if d_len < EPSILON {
        return Err(AttachError::CoincidentFramePoints { distance: d_len });
    }

    let x_hat = d / d_len;
    let t = p3 - p1;
    let cross_len = x_hat.cross(&t).norm();
    if cross_len < EPSILON {
        return Err(AttachError::CollinearFramePoints {
            cross_norm: cross_len,
        });
    }

    Ok(())
}

/// Construct the scale-carrying variant of the frame.
///
/// Same axis directions as [`build_frame3`] but unnormalized: X keeps the
/// full `p2 - p1` length, and Y and Z are rescaled to the length of the
/// component of `p3 - p1` perpendicular to X. A uniform dilation of the
/// defining points therefore yields a uniformly scaled frame, which is what
/// lets uniform-mode extraction read the dilation back off the determinant.
///
/// The exact rescaling sequence is load-bearing for bit-identical scale
/// extraction; do not reorder it.
///
/// # Errors
///
/// Same degeneracy checks as [`build_frame3`].
pub fn build_frame3_scaled(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
) -> AttachResult<Matrix4<f64>> {
    validate_frame3(p1, p2, p3)?;

    let col0 = p2 - p1;
    let t = p3 - p1;
    let mut col2 = col0.cross(&t);
    let mut col1 = col2.cross(&col0);

    let x_len = col0.norm();
    let x_hat = col0 / x_len;
    let t_perp = t - x_hat * t.dot(&x_hat);
    let t_perp_len = t_perp.norm();

    let col1_len = col1.norm();
    if col1_len > EPSILON && t_perp_len > EPSILON {
        col1 = col1 / col1_len * t_perp_len;
    }

    let col2_len = col2.norm();
    if col2_len > EPSILON && x_len > EPSILON {
        col2 = col2 / col2_len * (x_len * t_perp_len / x_len);
    }

    let col2_final_len = col2.norm();
    let col2 = if col2_final_len > EPSILON {
        col2 / col2_final_len * t_perp_len
    } else {
        col2
    };

    Ok(frame_from_columns(&col0, &col1, &col2, p1))
}

fn frame_from_columns(
    x: &Vector3<f64>,
    y: &Vector3<f64>,
    z: &Vector3<f64>,
    origin: &Point3<f64>,
) -> Matrix4<f64> {
    let mut mat = Matrix4::identity();
    mat.fixed_view_mut::<3, 1>(0, 0).copy_from(x);
    mat.fixed_view_mut::<3, 1>(0, 1).copy_from(y);
    mat.fixed_view_mut::<3, 1>(0, 2).copy_from(z);
    mat.fixed_view_mut::<3, 1>(0, 3).copy_from(&origin.coords);
    mat
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_frame() {
        let frame = build_frame3(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap();

        assert_relative_eq!(frame, Matrix4::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_wheel_convention_frame() {
        // p3 toward +Z puts the frame Y on world +Z and Z on world -Y.
        let frame = build_frame3(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 0.0, 1.0),
        )
        .unwrap();

        assert_relative_eq!(
            Vector3::from(frame.fixed_view::<3, 1>(0, 0)),
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            Vector3::from(frame.fixed_view::<3, 1>(0, 1)),
            Vector3::new(0.0, 0.0, 1.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            Vector3::from(frame.fixed_view::<3, 1>(0, 2)),
            Vector3::new(0.0, -1.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_translated_frame_keeps_origin() {
        let frame = build_frame3(
            &Point3::new(5.0, 3.0, 2.0),
            &Point3::new(6.0, 3.0, 2.0),
            &Point3::new(5.0, 4.0, 2.0),
        )
        .unwrap();

        assert_relative_eq!(
            Vector3::from(frame.fixed_view::<3, 1>(0, 3)),
            Vector3::new(5.0, 3.0, 2.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_orthonormal_and_right_handed() {
        let frame = build_frame3(
            &Point3::new(1.0, 2.0, 3.0),
            &Point3::new(4.0, 2.0, 3.0),
            &Point3::new(1.0, 5.0, 3.0),
        )
        .unwrap();

        let x = Vector3::from(frame.fixed_view::<3, 1>(0, 0));
        let y = Vector3::from(frame.fixed_view::<3, 1>(0, 1));
        let z = Vector3::from(frame.fixed_view::<3, 1>(0, 2));

        assert_relative_eq!(x.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(y.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(z.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(x.dot(&y), 0.0, epsilon = 1e-12);
        assert_relative_eq!(x.dot(&z), 0.0, epsilon = 1e-12);
        assert_relative_eq!(y.dot(&z), 0.0, epsilon = 1e-12);
        assert_relative_eq!(
            frame.fixed_view::<3, 3>(0, 0).determinant(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_coincident_points_rejected() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = build_frame3(&p, &p, &Point3::new(4.0, 5.0, 6.0));
        assert!(matches!(
            result,
            Err(AttachError::CoincidentFramePoints { .. })
        ));
    }

    #[test]
    fn test_collinear_points_rejected() {
        let result = build_frame3(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(2.0, 0.0, 0.0),
        );
        assert!(matches!(
            result,
            Err(AttachError::CollinearFramePoints { .. })
        ));
    }

    #[test]
    fn test_scaled_frame_dilates_uniformly() {
        let k = 2.0;
        let base = build_frame3_scaled(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        let scaled = build_frame3_scaled(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(k, 0.0, 0.0),
            &Point3::new(0.0, k, 0.0),
        )
        .unwrap();

        let base_block = base.fixed_view::<3, 3>(0, 0).into_owned();
        let scaled_block = scaled.fixed_view::<3, 3>(0, 0).into_owned();
        assert_relative_eq!(scaled_block, base_block * k, epsilon = 1e-12);
    }

    #[test]
    fn test_scaled_frame_rejects_degenerate_input() {
        let p = Point3::new(0.0, 0.0, 0.0);
        assert!(build_frame3_scaled(&p, &p, &Point3::new(0.0, 1.0, 0.0)).is_err());
    }
}
