//! Slot/mount reference resolution.

use hashbrown::HashSet;
use nalgebra::Point3;
use rig_types::{FrameRef, ResolvedPart};

use crate::error::{SceneError, SceneResult};

/// Resolve a slot or mount reference to three anchor ids on a part.
///
/// Explicit triples are checked against the part's anchor set directly.
/// Named references go through the part's published contract: the contract
/// must exist, the name must resolve (as `"{role}s.{name}"` or bare), and
/// the resulting set must be exactly 3 distinct anchors the part defines.
///
/// # Errors
///
/// [`SceneError`] naming the instance, role, and failing reference.
pub(crate) fn resolve_frame_ref(
    frame_ref: &FrameRef,
    asset: &ResolvedPart,
    role: &'static str,
    instance_id: &str,
) -> SceneResult<[String; 3]> {
    let anchor_ids: HashSet<&str> = asset.part.anchors.iter().map(|a| a.id.as_str()).collect();

    match frame_ref {
        FrameRef::Anchors { anchors } => {
            for anchor in anchors {
                if !anchor_ids.contains(anchor.as_str()) {
                    return Err(SceneError::AnchorNotFound {
                        instance: instance_id.to_string(),
                        role,
                        anchor: anchor.clone(),
                    });
                }
            }
            Ok(anchors.clone())
        }

        FrameRef::Named { name } => {
            let contract = asset.contract.as_ref().ok_or_else(|| {
                SceneError::MissingContract {
                    instance: instance_id.to_string(),
                    role,
                    name: name.clone(),
                }
            })?;

            let ids = contract.frame3_set(role, name).ok_or_else(|| {
                SceneError::NamedSetNotFound {
                    instance: instance_id.to_string(),
                    role,
                    name: name.clone(),
                }
            })?;

            let distinct: HashSet<&str> = ids.iter().map(String::as_str).collect();
            if ids.len() != 3 || distinct.len() != 3 {
                return Err(SceneError::NamedSetArity {
                    instance: instance_id.to_string(),
                    role,
                    name: name.clone(),
                    count: distinct.len(),
                });
            }

            for anchor in ids {
                if !anchor_ids.contains(anchor.as_str()) {
                    return Err(SceneError::AnchorNotFound {
                        instance: instance_id.to_string(),
                        role,
                        anchor: anchor.clone(),
                    });
                }
            }

            Ok([ids[0].clone(), ids[1].clone(), ids[2].clone()])
        }
    }
}

/// Look up the positions of three already-validated anchor ids.
pub(crate) fn anchor_triple(
    asset: &ResolvedPart,
    ids: &[String; 3],
    role: &'static str,
    instance_id: &str,
) -> SceneResult<[Point3<f64>; 3]> {
    let mut points = [Point3::origin(); 3];
    for (point, id) in points.iter_mut().zip(ids.iter()) {
        *point = asset
            .part
            .anchor_position(id)
            .ok_or_else(|| SceneError::AnchorNotFound {
                instance: instance_id.to_string(),
                role,
                anchor: id.clone(),
            })?;
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rig_types::{Anchor, Contract, Part};

    fn asset_with_anchors() -> ResolvedPart {
        let part = Part::new("0.2")
            .with_anchor(Anchor::new("a", [0.0, 0.0, 0.0]))
            .with_anchor(Anchor::new("b", [1.0, 0.0, 0.0]))
            .with_anchor(Anchor::new("c", [0.0, 0.0, 1.0]));
        ResolvedPart::new(Arc::new(part), "part.yaml")
    }

    fn named(name: &str) -> FrameRef {
        FrameRef::Named {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_explicit_anchors_resolve() {
        let asset = asset_with_anchors();
        let frame_ref = FrameRef::Anchors {
            anchors: ["a".to_string(), "b".to_string(), "c".to_string()],
        };
        let ids = resolve_frame_ref(&frame_ref, &asset, "slot", "child").unwrap();
        assert_eq!(ids[0], "a");
    }

    #[test]
    fn test_explicit_unknown_anchor() {
        let asset = asset_with_anchors();
        let frame_ref = FrameRef::Anchors {
            anchors: ["a".to_string(), "ghost".to_string(), "c".to_string()],
        };
        let result = resolve_frame_ref(&frame_ref, &asset, "slot", "child");
        assert!(matches!(
            result,
            Err(SceneError::AnchorNotFound { ref anchor, .. }) if anchor == "ghost"
        ));
    }

    #[test]
    fn test_named_without_contract() {
        let asset = asset_with_anchors();
        let result = resolve_frame_ref(&named("top"), &asset, "slot", "child");
        assert!(matches!(result, Err(SceneError::MissingContract { .. })));
    }

    #[test]
    fn test_named_resolves_role_qualified() {
        let mut contract = Contract::new("0.1");
        contract.frame3_sets.insert(
            "slots.top".to_string(),
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        );
        let asset = asset_with_anchors().with_contract(contract);

        let ids = resolve_frame_ref(&named("top"), &asset, "slot", "child").unwrap();
        assert_eq!(ids, ["a".to_string(), "b".into(), "c".into()]);
    }

    #[test]
    fn test_named_not_in_sets() {
        let asset = asset_with_anchors().with_contract(Contract::new("0.1"));
        let result = resolve_frame_ref(&named("top"), &asset, "slot", "child");
        assert!(matches!(result, Err(SceneError::NamedSetNotFound { .. })));
    }

    #[test]
    fn test_named_wrong_arity() {
        let mut contract = Contract::new("0.1");
        contract.frame3_sets.insert(
            "slots.top".to_string(),
            vec!["a".to_string(), "b".to_string()],
        );
        let asset = asset_with_anchors().with_contract(contract);

        let result = resolve_frame_ref(&named("top"), &asset, "slot", "child");
        assert!(matches!(
            result,
            Err(SceneError::NamedSetArity { count: 2, .. })
        ));
    }

    #[test]
    fn test_named_set_anchor_missing_from_part() {
        let mut contract = Contract::new("0.1");
        contract.frame3_sets.insert(
            "slots.top".to_string(),
            vec!["a".to_string(), "b".to_string(), "ghost".to_string()],
        );
        let asset = asset_with_anchors().with_contract(contract);

        let result = resolve_frame_ref(&named("top"), &asset, "slot", "child");
        assert!(matches!(
            result,
            Err(SceneError::AnchorNotFound { ref anchor, .. }) if anchor == "ghost"
        ));
    }
}
