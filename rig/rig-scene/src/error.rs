//! Error types for scene validation and composition.

use rig_attach::AttachError;
use rig_types::UnknownRotationError;
use thiserror::Error;

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while validating or composing a scene tree.
///
/// Structural errors (bad aliases, duplicate ids) are caught before any
/// placement math runs; every error names the instance and reference that
/// caused it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// The scene's declared base is not an import alias.
    #[error("scene base '{alias}' is not an import alias")]
    BaseAliasInvalid {
        /// The undeclared alias.
        alias: String,
    },

    /// Two scene nodes share an instance id.
    #[error("duplicate instance id '{id}' in scene tree")]
    DuplicateInstanceId {
        /// The repeated id.
        id: String,
    },

    /// A scene node references an alias with no loaded part.
    #[error("instance '{instance}': base alias '{alias}' has no loaded part")]
    ImportNotResolved {
        /// The offending instance id.
        instance: String,
        /// The unresolved alias.
        alias: String,
    },

    /// A named slot/mount reference was used against a part without a
    /// contract.
    #[error(
        "instance '{instance}': {role} uses named reference '{name}' but the part \
         has no contract"
    )]
    MissingContract {
        /// The offending instance id.
        instance: String,
        /// `slot` or `mount`.
        role: &'static str,
        /// The named reference.
        name: String,
    },

    /// A named reference is absent from the contract's frame3 sets.
    #[error("instance '{instance}': {role} name '{name}' not found in contract frame3_sets")]
    NamedSetNotFound {
        /// The offending instance id.
        instance: String,
        /// `slot` or `mount`.
        role: &'static str,
        /// The named reference.
        name: String,
    },

    /// A named reference resolved to something other than 3 distinct anchors.
    #[error(
        "instance '{instance}': {role} name '{name}' resolves to {count} distinct \
         anchors (expected 3)"
    )]
    NamedSetArity {
        /// The offending instance id.
        instance: String,
        /// `slot` or `mount`.
        role: &'static str,
        /// The named reference.
        name: String,
        /// Distinct anchor count actually found.
        count: usize,
    },

    /// A slot/mount anchor does not exist on its target part.
    #[error("instance '{instance}': {role} anchor '{anchor}' not found in part")]
    AnchorNotFound {
        /// The offending instance id.
        instance: String,
        /// `slot` or `mount`.
        role: &'static str,
        /// The unresolved anchor id.
        anchor: String,
    },

    /// A nudge component is not a valid distance token.
    #[error("invalid distance value '{value}'")]
    InvalidDistance {
        /// The rejected token.
        value: String,
    },

    /// Frame construction failed for a slot or mount triple.
    #[error("instance '{instance}': {role} frame degenerate: {source}")]
    DegenerateFrame {
        /// The offending instance id.
        instance: String,
        /// `slot` or `mount`.
        role: &'static str,
        /// The underlying frame failure.
        #[source]
        source: AttachError,
    },

    /// Frame construction failed outside of an instance context.
    #[error(transparent)]
    Frame(#[from] AttachError),

    /// A rotation token was not one of the four quarter turns.
    #[error(transparent)]
    UnknownRotation(#[from] UnknownRotationError),
}
