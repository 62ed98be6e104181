//! Error types for composition and contract validation.

use rig_attach::AttachError;
use rig_types::UnknownModeError;
use thiserror::Error;

/// Result type for composition operations.
pub type CompositionResult<T> = Result<T, CompositionError>;

/// Errors that can occur while resolving instances into transforms.
///
/// Composition is all-or-nothing: the first failure aborts the pass and
/// surfaces to the caller with the offending instance and reference named.
/// Nothing is recovered locally and no partial asset is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositionError {
    /// An instance references an import alias with no loaded part.
    #[error("instance '{instance}': import '{alias}' not found in resolved imports")]
    ImportNotResolved {
        /// The offending instance id.
        instance: String,
        /// The unresolved import alias.
        alias: String,
    },

    /// An anchor reference did not resolve in its target part.
    #[error("instance '{instance}' {side}: anchor '{anchor}' not found")]
    AnchorNotFound {
        /// The offending instance id.
        instance: String,
        /// Which side of the directive failed (`from` or `to`).
        side: &'static str,
        /// The unresolved anchor id.
        anchor: String,
    },

    /// A namespaced reference used the wrong namespace for its call site.
    #[error(
        "instance '{instance}' {side}: anchor ref '{reference}' has namespace \
         '{found}', expected '{expected}'"
    )]
    NamespaceMismatch {
        /// The offending instance id.
        instance: String,
        /// Which side of the directive failed (`from` or `to`).
        side: &'static str,
        /// The full reference string.
        reference: String,
        /// The namespace required at this call site.
        expected: String,
        /// The namespace the reference carried.
        found: String,
    },

    /// Frame construction or transform extraction failed.
    #[error(transparent)]
    Frame(#[from] AttachError),

    /// An imported part violated its published contract.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// An attach mode token was not recognized.
    #[error(transparent)]
    UnknownMode(#[from] UnknownModeError),
}

/// Errors raised when a part fails to satisfy its published contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// A required anchor is not defined by the part.
    #[error("contract requires anchor '{anchor}' but it is not defined in the part")]
    RequiredAnchorMissing {
        /// The missing anchor id.
        anchor: String,
    },

    /// A required frame3 set name is absent from `frame3_sets`.
    #[error("contract requires frame3 set '{set}' but it is not defined in frame3_sets")]
    RequiredSetMissing {
        /// The missing set name.
        set: String,
    },

    /// A frame3 set references an anchor the part does not define.
    #[error("frame3 set '{set}' references anchor '{anchor}' which is not defined in the part")]
    SetAnchorUnknown {
        /// The offending set name.
        set: String,
        /// The unresolved anchor id.
        anchor: String,
    },

    /// A frame3 set does not list exactly three distinct anchors.
    #[error("frame3 set '{set}' must list 3 distinct anchors, got {count}")]
    SetArity {
        /// The offending set name.
        set: String,
        /// Number of distinct anchors the set actually lists.
        count: usize,
    },
}
