//! Euler XYZ decomposition for transform baking.
//!
//! Convention: `R = Rz(rz) * Ry(ry) * Rx(rx)`, angles in radians. The
//! extraction reads pitch from `asin(-R[2,0])`; near the gimbal singularity
//! (`|R[2,0]|` within [`GIMBAL_EPSILON`] of 1) roll is pinned to zero and
//! yaw is taken from the surviving 2x2 block, so a 90-degree pitch never
//! produces NaN and always reconstructs the input matrix.

use nalgebra::{Matrix3, Rotation3};

/// Distance from `|sin(pitch)| = 1` below which the gimbal fallback kicks in.
pub const GIMBAL_EPSILON: f64 = 1e-9;

/// Build a rotation matrix from Euler XYZ angles.
#[must_use]
pub fn matrix_from_euler_xyz(angles: [f64; 3]) -> Matrix3<f64> {
    Rotation3::from_euler_angles(angles[0], angles[1], angles[2]).into_inner()
}

/// Extract Euler XYZ angles from a rotation matrix.
///
/// Inverse of [`matrix_from_euler_xyz`] away from the singularity; at the
/// singularity the returned roll is zero and the yaw absorbs the remaining
/// rotation, which still reconstructs the same matrix.
#[must_use]
pub fn euler_xyz_from_matrix(r: &Matrix3<f64>) -> [f64; 3] {
    let sin_pitch = (-r[(2, 0)]).clamp(-1.0, 1.0);
    let ry = sin_pitch.asin();

    if 1.0 - sin_pitch.abs() > GIMBAL_EPSILON {
        let rx = r[(2, 1)].atan2(r[(2, 2)]);
        let rz = r[(1, 0)].atan2(r[(0, 0)]);
        [rx, ry, rz]
    } else {
        let rz = (-r[(0, 1)]).atan2(r[(1, 1)]);
        [0.0, ry, rz]
    }
}
