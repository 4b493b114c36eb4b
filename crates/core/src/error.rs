//! Error types raised by sqlbind collaborators.
//!
//! Failures that originate below the binding engine - session execution,
//! bound-parameter lookups, collection construction, cursor misuse - are
//! represented by the [`Error`] enum here. The binding engine converts them
//! losslessly into its own error type.

use serde::{Deserialize, Serialize};

/// Collaborator errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// A bound-parameter lookup used a name that was never bound.
    #[error("parameter '{name}' not found. Available parameters are {available:?}")]
    ParameterNotFound {
        /// The requested parameter name.
        name: String,
        /// The names actually present, in insertion order.
        available: Vec<String>,
    },

    /// The object factory cannot build the requested container type.
    #[error("unknown collection type: {type_name}")]
    UnknownCollectionType {
        /// The declared container type name.
        type_name: String,
    },

    /// A cursor was read after it was closed.
    #[error("cursor is closed")]
    CursorClosed,

    /// Failure raised by a session implementation.
    #[error("session error: {reason}")]
    Session {
        /// Implementation-specific failure description.
        reason: String,
    },
}

impl Error {
    /// Shorthand for a session failure with the given reason.
    pub fn session(reason: impl Into<String>) -> Self {
        Error::Session {
            reason: reason.into(),
        }
    }
}

/// Result type for collaborator operations
pub type Result<T> = std::result::Result<T, Error>;
