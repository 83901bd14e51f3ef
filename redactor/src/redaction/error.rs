//! The redaction failure taxonomy.
//!
//! Three things can go wrong:
//!
//! - [`Error::InvalidConfiguration`] at build time: nothing was registered
//! - [`Error::Policy`] / [`Error::Structure`] during a walk: a policy
//!   reported a failure, or a flagged field's stored value did not match its
//!   declared shape
//! - [`Error::PolicyPanic`]: a policy panicked and the panic was contained
//!   at the redaction boundary

use std::fmt;

use thiserror::Error;

/// Which policy category was running when a failure surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyStage {
    /// A field policy on a singular field.
    Field,
    /// A map-entry policy on a matched map entry.
    MapEntry,
    /// A list policy on a list field.
    List,
}

impl PolicyStage {
    /// Returns the human-readable stage name.
    pub fn name(self) -> &'static str {
        match self {
            PolicyStage::Field => "field",
            PolicyStage::MapEntry => "map entry",
            PolicyStage::List => "list",
        }
    }
}

impl fmt::Display for PolicyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors surfaced by [`Redactor`](crate::Redactor) construction and calls.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The builder finished with no policies registered.
    #[error("invalid redactor configuration: no policies registered")]
    InvalidConfiguration,

    /// A policy returned a failure; the walk stopped at that point.
    ///
    /// In-place redaction may have applied earlier mutations already; there
    /// is no rollback.
    #[error("{stage} policy failed on field `{field}`")]
    Policy {
        /// The policy category that failed.
        stage: PolicyStage,
        /// Name of the field being dispatched when the policy failed.
        field: String,
        /// The policy's own error.
        #[source]
        source: anyhow::Error,
    },

    /// A flagged field's stored value did not have the shape its descriptor
    /// declares, so dispatch was impossible.
    #[error("flagged field `{field}` holds a {actual} value where a {expected} was expected")]
    Structure {
        /// Name of the offending field.
        field: String,
        /// The shape the descriptor declares.
        expected: &'static str,
        /// The shape actually found.
        actual: &'static str,
    },

    /// A policy panicked; the panic was contained at the redaction boundary.
    #[error("policy panicked: {message}")]
    PolicyPanic {
        /// Text recovered from the panic payload.
        message: String,
    },
}
