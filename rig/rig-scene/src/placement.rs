//! Placement transform math for scene composition.

use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
use rig_attach::build_frame3;
use rig_types::QuarterTurn;

use crate::error::{SceneError, SceneResult};

/// Parse a distance token to meters.
///
/// Accepted forms: a signed decimal with an optional `cm`/`m`/`in`/`ft`
/// suffix. Bare numbers are meters. Exponents, `inf`/`nan`, and leading
/// `+` are rejected.
///
/// # Errors
///
/// [`SceneError::InvalidDistance`] for anything outside the grammar.
///
/// # Example
///
/// ```
/// use rig_scene::parse_distance;
///
/// assert_eq!(parse_distance("0").unwrap(), 0.0);
/// assert_eq!(parse_distance("20cm").unwrap(), 0.2);
/// assert_eq!(parse_distance("-5cm").unwrap(), -0.05);
/// assert_eq!(parse_distance("1ft").unwrap(), 0.3048);
/// assert!(parse_distance("abc").is_err());
/// ```
pub fn parse_distance(token: &str) -> SceneResult<f64> {
    let s = token.trim();

    // Suffix order matters: "cm" must be peeled before the bare "m".
    let (number, factor) = if let Some(v) = s.strip_suffix("cm") {
        (v, 0.01)
    } else if let Some(v) = s.strip_suffix("in") {
        (v, 0.0254)
    } else if let Some(v) = s.strip_suffix("ft") {
        (v, 0.3048)
    } else if let Some(v) = s.strip_suffix('m') {
        (v, 1.0)
    } else {
        (s, 1.0)
    };

    if !is_plain_decimal(number) {
        return Err(SceneError::InvalidDistance {
            value: token.to_string(),
        });
    }

    let value: f64 = number.parse().map_err(|_| SceneError::InvalidDistance {
        value: token.to_string(),
    })?;
    Ok(value * factor)
}

/// `-?digits(.digits)?` and nothing else.
fn is_plain_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    if unsigned.is_empty() {
        return false;
    }
    let mut split = unsigned.splitn(2, '.');
    let integral = split.next().unwrap_or_default();
    let fractional = split.next();

    !integral.is_empty()
        && integral.bytes().all(|b| b.is_ascii_digit())
        && fractional.map_or(true, |f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()))
}

/// Rotation matrix for a discrete twist about the frame's Y axis.
///
/// Exact entries, no trigonometry: quarter turns stay bit-identical.
#[must_use]
pub fn quarter_turn_matrix(turn: QuarterTurn) -> Matrix3<f64> {
    match turn {
        QuarterTurn::Deg0 => Matrix3::identity(),
        QuarterTurn::Deg90 => {
            Matrix3::new(0.0, 0.0, 1.0, 0.0, 1.0, 0.0, -1.0, 0.0, 0.0)
        }
        QuarterTurn::Deg180 => {
            Matrix3::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0)
        }
        QuarterTurn::Deg270 => {
            Matrix3::new(0.0, 0.0, -1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0)
        }
    }
}

/// Compute the local placement transform for one slot/mount pairing.
///
/// Builds normalized frames for both triples, then:
///
/// ```text
/// nudge_world = east * X_s + up * Y_s + north * Z_s
/// R = R_s * R_rot * R_m^-1
/// T = (O_s + nudge_world) - R * O_m
/// ```
///
/// The mount frame's origin lands exactly on the slot frame's origin (plus
/// nudge) with the mount's axes rotated onto the slot's axes, modulo the
/// discrete twist. The nudge is expressed in the slot's local axes, not
/// world axes, so "10cm east" means the same thing however the parent is
/// oriented.
///
/// # Errors
///
/// Frame degeneracy errors from [`build_frame3`] for either triple.
pub fn compute_placement_transform(
    slot_points: &[Point3<f64>; 3],
    mount_points: &[Point3<f64>; 3],
    rotate: QuarterTurn,
    nudge_meters: (f64, f64, f64),
) -> SceneResult<Matrix4<f64>> {
    let slot_frame = build_frame3(&slot_points[0], &slot_points[1], &slot_points[2])?;
    let slot_rotation = slot_frame.fixed_view::<3, 3>(0, 0).into_owned();
    let slot_origin = Vector3::from(slot_frame.fixed_view::<3, 1>(0, 3));

    let mount_frame = build_frame3(&mount_points[0], &mount_points[1], &mount_points[2])?;
    let mount_rotation = mount_frame.fixed_view::<3, 3>(0, 0).into_owned();
    let mount_origin = Vector3::from(mount_frame.fixed_view::<3, 1>(0, 3));

    let (east, up, north) = nudge_meters;
    let nudge_world = slot_rotation.column(0) * east
        + slot_rotation.column(1) * up
        + slot_rotation.column(2) * north;

    // Orthonormal by construction: the inverse is the transpose.
    let rotation = slot_rotation * quarter_turn_matrix(rotate) * mount_rotation.transpose();
    let translation = (slot_origin + nudge_world) - rotation * mount_origin;

    let mut result = Matrix4::identity();
    result.fixed_view_mut::<3, 3>(0, 0).copy_from(&rotation);
    result.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn standard_points() -> [Point3<f64>; 3] {
        // Frame at origin with X, Y, Z on the world axes.
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_parse_distance_units() {
        assert_relative_eq!(parse_distance("1.5m").unwrap(), 1.5);
        assert_relative_eq!(parse_distance("20cm").unwrap(), 0.2);
        assert_relative_eq!(parse_distance("2in").unwrap(), 0.0508);
        assert_relative_eq!(parse_distance("1ft").unwrap(), 0.3048);
        assert_relative_eq!(parse_distance("-5cm").unwrap(), -0.05);
        assert_relative_eq!(parse_distance("10").unwrap(), 10.0);
    }

    #[test]
    fn test_parse_distance_rejects_garbage() {
        for bad in ["abc", "", "10km", "1e3", "nan", "+5", "--2", "5.", ".5"] {
            assert!(parse_distance(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_identity_placement() {
        let pts = standard_points();
        let t =
            compute_placement_transform(&pts, &pts, QuarterTurn::Deg0, (0.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(t, Matrix4::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_translation_offset() {
        let slot = [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let t = compute_placement_transform(
            &slot,
            &standard_points(),
            QuarterTurn::Deg0,
            (0.0, 0.0, 0.0),
        )
        .unwrap();

        assert_relative_eq!(
            t.fixed_view::<3, 3>(0, 0).into_owned(),
            Matrix3::identity(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            Vector3::from(t.fixed_view::<3, 1>(0, 3)),
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_quarter_turns() {
        let pts = standard_points();
        for (turn, expected) in [
            (QuarterTurn::Deg90, quarter_turn_matrix(QuarterTurn::Deg90)),
            (QuarterTurn::Deg180, quarter_turn_matrix(QuarterTurn::Deg180)),
            (QuarterTurn::Deg270, quarter_turn_matrix(QuarterTurn::Deg270)),
        ] {
            let t = compute_placement_transform(&pts, &pts, turn, (0.0, 0.0, 0.0)).unwrap();
            assert_relative_eq!(
                t.fixed_view::<3, 3>(0, 0).into_owned(),
                expected,
                epsilon = 1e-12
            );
            assert_relative_eq!(
                Vector3::from(t.fixed_view::<3, 1>(0, 3)),
                Vector3::zeros(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_nudge_follows_slot_axes() {
        let pts = standard_points();
        let t = compute_placement_transform(&pts, &pts, QuarterTurn::Deg0, (0.1, 0.2, 0.3))
            .unwrap();

        // Slot axes are the world axes here, so east/up/north land on X/Y/Z.
        assert_relative_eq!(
            Vector3::from(t.fixed_view::<3, 1>(0, 3)),
            Vector3::new(0.1, 0.2, 0.3),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_nudge_is_slot_relative_not_world() {
        // Slot frame with X on world -Z (rotated 90deg about Y).
        let slot = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let t = compute_placement_transform(
            &slot,
            &standard_points(),
            QuarterTurn::Deg0,
            (0.1, 0.0, 0.0),
        )
        .unwrap();

        // An "east" nudge moves along the slot's X axis: world -Z.
        assert_relative_eq!(
            Vector3::from(t.fixed_view::<3, 1>(0, 3)),
            Vector3::new(0.0, 0.0, -0.1),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_degenerate_slot_rejected() {
        let collinear = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let result = compute_placement_transform(
            &collinear,
            &standard_points(),
            QuarterTurn::Deg0,
            (0.0, 0.0, 0.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_combined_rotation_and_nudge() {
        let pts = standard_points();
        let t = compute_placement_transform(&pts, &pts, QuarterTurn::Deg90, (0.5, 0.0, 0.0))
            .unwrap();

        assert_relative_eq!(
            t.fixed_view::<3, 3>(0, 0).into_owned(),
            quarter_turn_matrix(QuarterTurn::Deg90),
            epsilon = 1e-12
        );
        // Nudge applies in slot axes, unaffected by the twist.
        assert_relative_eq!(
            Vector3::from(t.fixed_view::<3, 1>(0, 3)),
            Vector3::new(0.5, 0.0, 0.0),
            epsilon = 1e-12
        );
    }
}
