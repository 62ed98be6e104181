//! Error types for frame construction and transform extraction.

use thiserror::Error;

/// Result type for attach operations.
pub type AttachResult<T> = Result<T, AttachError>;

/// Errors that can occur while building frames or extracting transforms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttachError {
    /// The first two frame points are too close to define an X axis.
    #[error("degenerate frame: distance(p1, p2) = {distance:.2e} below epsilon")]
    CoincidentFramePoints {
        /// Distance between the first two points.
        distance: f64,
    },

    /// The three frame points are collinear.
    #[error("degenerate frame: points are collinear (|x_hat x t| = {cross_norm:.2e})")]
    CollinearFramePoints {
        /// Norm of the cross product that should span the frame plane.
        cross_norm: f64,
    },

    /// Uniform-scale extraction hit a near-zero determinant.
    #[error("degenerate transform: near-zero determinant ({det:.2e})")]
    DegenerateTransform {
        /// Determinant of the transform's 3x3 block.
        det: f64,
    },

    /// SVD computation failed during polar decomposition.
    #[error("SVD computation failed during polar decomposition")]
    SvdFailed,
}
