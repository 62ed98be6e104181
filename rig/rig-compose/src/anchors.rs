//! Anchor reference resolution.
//!
//! References come in two shapes at the instance level: bare ids resolved
//! against the current part, and `namespace.id` refs resolved against an
//! imported part under its alias. Resolution is all-or-nothing: one
//! unresolved member fails the whole triple.

use hashbrown::HashMap;
use nalgebra::Point3;

use crate::error::{CompositionError, CompositionResult};

/// Resolve a triple of local anchor references.
pub(crate) fn resolve_local_triple(
    refs: &[String; 3],
    anchors: &HashMap<&str, Point3<f64>>,
    instance_id: &str,
    side: &'static str,
) -> CompositionResult<[Point3<f64>; 3]> {
    let mut points = [Point3::origin(); 3];
    for (point, reference) in points.iter_mut().zip(refs.iter()) {
        *point = *anchors
            .get(reference.as_str())
            .ok_or_else(|| CompositionError::AnchorNotFound {
                instance: instance_id.to_string(),
                side,
                anchor: reference.clone(),
            })?;
    }
    Ok(points)
}

/// Resolve a triple of `namespace.id` (or bare) references against an
/// imported part's anchors.
///
/// A namespace segment, when present, must equal the import alias of the
/// call site; anything else is a wiring mistake worth failing loudly on.
pub(crate) fn resolve_namespaced_triple(
    refs: &[String; 3],
    expected_namespace: &str,
    anchors: &HashMap<&str, Point3<f64>>,
    instance_id: &str,
    side: &'static str,
) -> CompositionResult<[Point3<f64>; 3]> {
    let mut points = [Point3::origin(); 3];
    for (point, reference) in points.iter_mut().zip(refs.iter()) {
        let anchor_id = match reference.split_once('.') {
            Some((namespace, anchor_id)) => {
                if namespace != expected_namespace {
                    return Err(CompositionError::NamespaceMismatch {
                        instance: instance_id.to_string(),
                        side,
                        reference: reference.clone(),
                        expected: expected_namespace.to_string(),
                        found: namespace.to_string(),
                    });
                }
                anchor_id
            }
            None => reference.as_str(),
        };

        *point = *anchors
            .get(anchor_id)
            .ok_or_else(|| CompositionError::AnchorNotFound {
                instance: instance_id.to_string(),
                side,
                anchor: anchor_id.to_string(),
            })?;
    }
    Ok(points)
}
