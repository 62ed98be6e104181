//! Structural validation of scene trees.

use hashbrown::HashSet;
use rig_attach::build_frame3;
use rig_types::{ResolvedScene, SceneChild};

use crate::error::{SceneError, SceneResult};
use crate::refs::{anchor_triple, resolve_frame_ref};

/// Validate a scene tree before composition.
///
/// Checks, in order:
///
/// 1. `scene.base` is an import alias
/// 2. every child's `base` is an import alias with a loaded part
/// 3. instance ids are unique across the whole tree
/// 4. every slot reference resolves on its parent part and every mount
///    reference on its child part (named references contract-gated)
/// 5. every slot and mount triple builds a non-degenerate frame
///
/// Everything here runs before any placement math; a scene that validates
/// cleanly cannot fail structurally during composition.
///
/// # Errors
///
/// The first [`SceneError`] encountered, naming the offending instance.
pub fn validate_scene(scene: &ResolvedScene) -> SceneResult<()> {
    let spec = &scene.spec;

    if !spec.imports.contains_key(&spec.scene.base) {
        return Err(SceneError::BaseAliasInvalid {
            alias: spec.scene.base.clone(),
        });
    }

    // Flatten the tree with explicit parent context.
    let mut flattened: Vec<(&SceneChild, &str)> = Vec::new();
    for child in &spec.scene.children {
        collect_children(child, &spec.scene.base, &mut flattened);
    }

    for (child, _) in &flattened {
        if !spec.imports.contains_key(&child.base) {
            return Err(SceneError::ImportNotResolved {
                instance: child.id.clone(),
                alias: child.base.clone(),
            });
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for (child, _) in &flattened {
        if !seen.insert(child.id.as_str()) {
            return Err(SceneError::DuplicateInstanceId {
                id: child.id.clone(),
            });
        }
    }

    for (child, parent_alias) in &flattened {
        let parent_asset = scene.imports.get(*parent_alias).ok_or_else(|| {
            SceneError::ImportNotResolved {
                instance: child.id.clone(),
                alias: (*parent_alias).to_string(),
            }
        })?;
        let child_asset = scene.imports.get(&child.base).ok_or_else(|| {
            SceneError::ImportNotResolved {
                instance: child.id.clone(),
                alias: child.base.clone(),
            }
        })?;

        let slot_ids = resolve_frame_ref(&child.place.slot, parent_asset, "slot", &child.id)?;
        let mount_ids = resolve_frame_ref(&child.place.mount, child_asset, "mount", &child.id)?;

        let slot_points = anchor_triple(parent_asset, &slot_ids, "slot", &child.id)?;
        let mount_points = anchor_triple(child_asset, &mount_ids, "mount", &child.id)?;

        build_frame3(&slot_points[0], &slot_points[1], &slot_points[2]).map_err(|source| {
            SceneError::DegenerateFrame {
                instance: child.id.clone(),
                role: "slot",
                source,
            }
        })?;
        build_frame3(&mount_points[0], &mount_points[1], &mount_points[2]).map_err(|source| {
            SceneError::DegenerateFrame {
                instance: child.id.clone(),
                role: "mount",
                source,
            }
        })?;
    }

    Ok(())
}

fn collect_children<'a>(
    child: &'a SceneChild,
    parent_alias: &'a str,
    out: &mut Vec<(&'a SceneChild, &'a str)>,
) {
    out.push((child, parent_alias));
    for grandchild in &child.children {
        collect_children(grandchild, &child.base, out);
    }
}
