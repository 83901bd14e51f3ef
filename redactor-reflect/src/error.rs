//! Error types for descriptor construction and message mutation.

use thiserror::Error;

/// Errors reported by descriptor builders and [`DynamicMessage`] mutators.
///
/// [`DynamicMessage`]: crate::DynamicMessage
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReflectError {
    /// The referenced field does not belong to the message's descriptor.
    #[error("message `{message}` has no field `{field}`")]
    UnknownField {
        /// Name of the message type.
        message: String,
        /// Name of the missing field.
        field: String,
    },

    /// Two fields in one descriptor share a field number.
    #[error("duplicate field number {number} in message `{message}`")]
    DuplicateFieldNumber {
        /// Name of the message type.
        message: String,
        /// The repeated field number.
        number: u32,
    },

    /// Two fields in one descriptor share a name.
    #[error("duplicate field name `{name}` in message `{message}`")]
    DuplicateFieldName {
        /// Name of the message type.
        message: String,
        /// The repeated field name.
        name: String,
    },

    /// A value's kind does not match the field's declared kind.
    #[error("field `{field}` holds {expected} values, received {actual}")]
    KindMismatch {
        /// Name of the field being set.
        field: String,
        /// The declared kind.
        expected: String,
        /// The kind of the rejected value.
        actual: String,
    },

    /// A value's shape does not match the field's cardinality.
    #[error("field `{field}` is a {expected} field, received a {actual} value")]
    CardinalityMismatch {
        /// Name of the field being set.
        field: String,
        /// The declared cardinality.
        expected: &'static str,
        /// The shape of the rejected value.
        actual: String,
    },
}
