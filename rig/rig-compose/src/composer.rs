//! Instance composition: resolve every instance of a part into a transform.

use std::sync::Arc;

use nalgebra::Matrix4;
use rig_attach::compute_attach_transform;
use rig_types::{Instance, Part, ResolvedPart};
use tracing::debug;

use crate::anchors::{resolve_local_triple, resolve_namespaced_triple};
use crate::contracts::validate_contract;
use crate::error::{CompositionError, CompositionResult};

/// One instance resolved to a concrete transform.
#[derive(Debug, Clone)]
pub struct ResolvedInstance {
    /// Instance id from the part definition.
    pub id: String,

    /// The placed part, shared read-only. `None` for local-mesh instances.
    pub source: Option<Arc<Part>>,

    /// Placement transform in the root part's space.
    pub transform: Matrix4<f64>,

    /// Namespace the instance's content lives under in the output: the
    /// import alias, or the instance's own id for local meshes.
    pub namespace: String,

    /// Referenced local mesh id. `None` for imported instances.
    pub mesh_id: Option<String>,
}

/// A part with all of its instances resolved, ready for export.
#[derive(Debug, Clone)]
pub struct ComposedAsset {
    /// The root part, unchanged.
    pub root: Arc<Part>,

    /// Resolved instances in declaration order.
    pub instances: Vec<ResolvedInstance>,
}

/// Resolve all instances in a part, computing attach transforms.
///
/// Every imported part that publishes a contract is validated first; no
/// instance math runs against a part that violates its own interface.
/// Instances then resolve in declaration order. A part without instances
/// passes through with an empty instance list.
///
/// # Errors
///
/// [`CompositionError`] on the first unresolved import, unresolved anchor,
/// namespace mismatch, degenerate frame, or contract violation. The input
/// is never partially composed.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rig_types::{Part, ResolvedPart};
/// use rig_compose::resolve_composition;
///
/// let part = Arc::new(Part::new("0.2"));
/// let resolved = ResolvedPart::new(part, "standalone.yaml");
///
/// let composed = resolve_composition(&resolved).unwrap();
/// assert!(composed.instances.is_empty());
/// ```
pub fn resolve_composition(asset: &ResolvedPart) -> CompositionResult<ComposedAsset> {
    // Contract gate, in sorted alias order so the first violation reported
    // does not depend on map iteration.
    let mut aliases: Vec<&str> = asset.imports.keys().map(String::as_str).collect();
    aliases.sort_unstable();
    for alias in aliases {
        let import = &asset.imports[alias];
        if let Some(contract) = &import.contract {
            validate_contract(&import.part, contract)?;
        }
    }

    if asset.part.instances.is_empty() {
        return Ok(ComposedAsset {
            root: Arc::clone(&asset.part),
            instances: Vec::new(),
        });
    }

    let local_anchors = asset.part.anchor_map();
    let mut instances = Vec::with_capacity(asset.part.instances.len());

    for instance in &asset.part.instances {
        let resolved = match instance {
            Instance::Local {
                id,
                mesh_id,
                attach3,
            } => {
                let transform = match attach3 {
                    None => Matrix4::identity(),
                    Some(attach3) => {
                        let from =
                            resolve_local_triple(&attach3.from, &local_anchors, id, "from")?;
                        let to = resolve_local_triple(&attach3.to, &local_anchors, id, "to")?;
                        compute_attach_transform(&from, &to, attach3.mode)?
                    }
                };
                ResolvedInstance {
                    id: id.clone(),
                    source: None,
                    transform,
                    namespace: id.clone(),
                    mesh_id: Some(mesh_id.clone()),
                }
            }

            Instance::Imported {
                id,
                import,
                attach3,
            } => {
                let imported = asset.imports.get(import).ok_or_else(|| {
                    CompositionError::ImportNotResolved {
                        instance: id.clone(),
                        alias: import.clone(),
                    }
                })?;

                let imported_anchors = imported.part.anchor_map();
                let from = resolve_namespaced_triple(
                    &attach3.from,
                    import,
                    &imported_anchors,
                    id,
                    "from",
                )?;
                let to = resolve_local_triple(&attach3.to, &local_anchors, id, "to")?;
                let transform = compute_attach_transform(&from, &to, attach3.mode)?;

                ResolvedInstance {
                    id: id.clone(),
                    source: Some(Arc::clone(&imported.part)),
                    transform,
                    namespace: import.clone(),
                    mesh_id: None,
                }
            }
        };

        debug!(instance = %resolved.id, namespace = %resolved.namespace, "instance resolved");
        instances.push(resolved);
    }

    Ok(ComposedAsset {
        root: Arc::clone(&asset.part),
        instances,
    })
}
