//! Error types for the binding engine.
//!
//! All binding failures are represented by the [`Error`] enum. These are:
//! - **Structured**: each variant has typed fields for error details
//! - **Fail-fast**: detected before, or immediately after, the single
//!   session call per invocation
//! - **Lossless**: collaborator errors convert without losing information

use serde::{Deserialize, Serialize};

/// Binding and execution errors.
///
/// Every error carries enough context (statement id, parameter key, type
/// name) to diagnose root cause; the engine performs no partial writes and
/// never downgrades a failure to a default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Resolution ====================
    /// No command is registered for a method and no flush marker applies.
    #[error("invalid bound statement (not found): {statement}")]
    UnresolvedStatement {
        /// Full statement identifier that failed to resolve.
        statement: String,
    },

    /// A registered command's kind is unusable.
    #[error("unknown execution method for: {statement}")]
    UnknownCommandKind {
        /// Statement identifier of the unusable command.
        statement: String,
    },

    /// No mapper interface is registered under the requested name.
    #[error("mapper not registered: {mapper}")]
    UnknownMapper {
        /// The requested mapper interface name.
        mapper: String,
    },

    // ==================== Signature ====================
    /// More than one paging-window or row-callback parameter on a method.
    #[error("method '{method}' cannot have multiple {marker} parameters")]
    DuplicateMarkerParameter {
        /// The offending method name.
        method: String,
        /// Which marker kind was duplicated.
        marker: String,
    },

    /// A void, callback-based select lacks the metadata needed to build a
    /// result handler.
    #[error(
        "method '{statement}' needs a declared result type so a row callback can be used as a parameter"
    )]
    MissingResultShapeAnnotation {
        /// Statement identifier of the select.
        statement: String,
    },

    // ==================== Binding ====================
    /// A lookup into bound parameters used a key that is not present.
    #[error("parameter '{name}' not found. Available parameters are {available:?}")]
    ParameterNotFound {
        /// The requested key.
        name: String,
        /// The keys actually present, in insertion order.
        available: Vec<String>,
    },

    /// The call's arguments disagree with the declared parameter list.
    #[error("argument mismatch in '{method}': {reason}")]
    ArgumentMismatch {
        /// The called method.
        method: String,
        /// What disagreed.
        reason: String,
    },

    // ==================== Result shaping ====================
    /// A mutation's declared return type cannot represent a row count.
    #[error("method '{statement}' has an unsupported return type: {declared}")]
    UnsupportedReturnType {
        /// Statement identifier of the mutation.
        statement: String,
        /// The declared return type.
        declared: String,
    },

    /// A primitive-returning method matched no row.
    #[error(
        "method '{statement}' attempted to return null for a primitive return type ({declared})"
    )]
    NullForPrimitiveReturn {
        /// Statement identifier of the select.
        statement: String,
        /// The declared primitive type.
        declared: String,
    },

    // ==================== Dispatch ====================
    /// Resolved kind does not match any dispatch branch. Defensive;
    /// unreachable under correct resolution.
    #[error("unknown dispatch for command: {statement}")]
    UnknownCommandDispatch {
        /// Statement identifier, or the method identity when no statement
        /// name was resolved.
        statement: String,
    },

    // ==================== Collaborators ====================
    /// Failure propagated unchanged from a collaborator.
    #[error("session error: {0}")]
    Session(sqlbind_core::Error),
}

/// Convert a collaborator error to a binding error.
///
/// The parameter-lookup failure keeps its structure; everything else is
/// carried through as a session failure.
impl From<sqlbind_core::Error> for Error {
    fn from(err: sqlbind_core::Error) -> Self {
        match err {
            sqlbind_core::Error::ParameterNotFound { name, available } => {
                Error::ParameterNotFound { name, available }
            }
            other => Error::Session(other),
        }
    }
}
