//! Scene composition: tree walk and world-transform accumulation.

use std::sync::Arc;

use nalgebra::Matrix4;
use rig_types::{Part, ResolvedScene, SceneChild};
use tracing::debug;

use crate::error::{SceneError, SceneResult};
use crate::placement::{compute_placement_transform, parse_distance};
use crate::refs::{anchor_triple, resolve_frame_ref};

/// A resolved node of the composed scene.
#[derive(Debug, Clone)]
pub struct RigsInstance {
    /// Instance id from the scene tree.
    pub id: String,

    /// Import alias of the placed part.
    pub asset_alias: String,

    /// The placed part, shared read-only.
    pub part: Arc<Part>,

    /// Placement relative to the parent node.
    pub local_transform: Matrix4<f64>,

    /// Accumulated placement in scene space:
    /// `parent.world_transform * local_transform`.
    pub world_transform: Matrix4<f64>,

    /// Child nodes, placed against this node's part.
    pub children: Vec<RigsInstance>,
}

/// The fully composed scene.
#[derive(Debug, Clone)]
pub struct ComposedScene {
    /// Alias of the root part.
    pub root_alias: String,

    /// The root part at the scene origin.
    pub root: Arc<Part>,

    /// Top-level instances in declaration order.
    pub instances: Vec<RigsInstance>,
}

/// Compose a scene by resolving every placement into world transforms.
///
/// Walks the tree pre-order in declaration order. The parent context
/// (alias and accumulated world transform) is threaded explicitly through
/// the recursion; there is no mutable traversal state. World transforms
/// are exact matrix products, never re-normalized, so a deep chain is as
/// deterministic as a single placement.
///
/// Run [`crate::validate_scene`] first for the full structural check; the
/// walk itself still fails cleanly on anything unresolvable.
///
/// # Errors
///
/// [`SceneError`] on unresolved aliases or references, invalid distance
/// tokens, or degenerate frames.
pub fn compose_scene(scene: &ResolvedScene) -> SceneResult<ComposedScene> {
    let root_alias = &scene.spec.scene.base;
    let root_asset = scene
        .imports
        .get(root_alias)
        .ok_or_else(|| SceneError::BaseAliasInvalid {
            alias: root_alias.clone(),
        })?;

    let parent_world = Matrix4::identity();
    let mut instances = Vec::with_capacity(scene.spec.scene.children.len());
    for child in &scene.spec.scene.children {
        instances.push(resolve_child(child, root_alias, &parent_world, scene)?);
    }

    debug!(root = %root_alias, instances = instances.len(), "scene composed");

    Ok(ComposedScene {
        root_alias: root_alias.clone(),
        root: Arc::clone(&root_asset.part),
        instances,
    })
}

/// Resolve one scene node and its descendants.
fn resolve_child(
    child: &SceneChild,
    parent_alias: &str,
    parent_world: &Matrix4<f64>,
    scene: &ResolvedScene,
) -> SceneResult<RigsInstance> {
    let parent_asset =
        scene
            .imports
            .get(parent_alias)
            .ok_or_else(|| SceneError::ImportNotResolved {
                instance: child.id.clone(),
                alias: parent_alias.to_string(),
            })?;
    let child_asset =
        scene
            .imports
            .get(&child.base)
            .ok_or_else(|| SceneError::ImportNotResolved {
                instance: child.id.clone(),
                alias: child.base.clone(),
            })?;

    let slot_ids = resolve_frame_ref(&child.place.slot, parent_asset, "slot", &child.id)?;
    let mount_ids = resolve_frame_ref(&child.place.mount, child_asset, "mount", &child.id)?;

    let slot_points = anchor_triple(parent_asset, &slot_ids, "slot", &child.id)?;
    let mount_points = anchor_triple(child_asset, &mount_ids, "mount", &child.id)?;

    let nudge = match &child.place.nudge {
        Some(nudge) => (
            parse_distance(&nudge.east)?,
            parse_distance(&nudge.up)?,
            parse_distance(&nudge.north)?,
        ),
        None => (0.0, 0.0, 0.0),
    };

    let local_transform =
        compute_placement_transform(&slot_points, &mount_points, child.place.rotate, nudge)?;
    let world_transform = parent_world * local_transform;

    let mut children = Vec::with_capacity(child.children.len());
    for grandchild in &child.children {
        children.push(resolve_child(
            grandchild,
            &child.base,
            &world_transform,
            scene,
        )?);
    }

    Ok(RigsInstance {
        id: child.id.clone(),
        asset_alias: child.base.clone(),
        part: Arc::clone(&child_asset.part),
        local_transform,
        world_transform,
        children,
    })
}
