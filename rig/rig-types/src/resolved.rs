//! Loader outputs: parts and scenes with their import graphs resolved.
//!
//! The external loader walks `imports` declarations, reads files, and hands
//! composition one of these containers. Nothing in this workspace performs
//! I/O; the containers only carry already-loaded data.

use std::path::PathBuf;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::{Contract, Part, SceneSpec};

/// A part with every import alias resolved to a loaded part.
///
/// Input to instance composition and scene placement. The import graph is
/// acyclic by the time this exists: the loader rejects circular imports
/// while reading files.
#[derive(Debug, Clone)]
pub struct ResolvedPart {
    /// The part itself, shared read-only.
    pub part: Arc<Part>,

    /// Path the part was loaded from.
    pub path: PathBuf,

    /// Contract published next to the part, if any.
    pub contract: Option<Contract>,

    /// Imported parts keyed by alias.
    pub imports: HashMap<String, ResolvedPart>,
}

impl ResolvedPart {
    /// Wrap a part with no contract and no imports.
    #[must_use]
    pub fn new(part: Arc<Part>, path: impl Into<PathBuf>) -> Self {
        Self {
            part,
            path: path.into(),
            contract: None,
            imports: HashMap::new(),
        }
    }

    /// Attach the part's published contract (builder pattern).
    #[must_use]
    pub fn with_contract(mut self, contract: Contract) -> Self {
        self.contract = Some(contract);
        self
    }

    /// Register an imported part (builder pattern).
    #[must_use]
    pub fn with_import(mut self, alias: impl Into<String>, import: ResolvedPart) -> Self {
        self.imports.insert(alias.into(), import);
        self
    }
}

/// A scene spec with every part alias resolved to a loaded part.
///
/// Input to scene validation and composition.
#[derive(Debug, Clone)]
pub struct ResolvedScene {
    /// The scene spec.
    pub spec: SceneSpec,

    /// Path the spec was loaded from.
    pub path: PathBuf,

    /// Resolved parts keyed by import alias.
    pub imports: HashMap<String, ResolvedPart>,
}

impl ResolvedScene {
    /// Wrap a spec with no imports.
    #[must_use]
    pub fn new(spec: SceneSpec, path: impl Into<PathBuf>) -> Self {
        Self {
            spec,
            path: path.into(),
            imports: HashMap::new(),
        }
    }

    /// Register a resolved part (builder pattern).
    #[must_use]
    pub fn with_import(mut self, alias: impl Into<String>, part: ResolvedPart) -> Self {
        self.imports.insert(alias.into(), part);
        self
    }
}
