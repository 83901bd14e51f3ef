//! Adapters for emitting redacted messages through `slog`.
//!
//! This module exists to connect [`Redactor`] output with `slog` by providing
//! a `slog::Value` carrier that serializes redacted messages as structured
//! JSON via `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is derived from a redacted copy of
//!   the message, never from the original.
//! - Avoiding fallible logging APIs: redaction failures are represented as
//!   placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog`, define redaction policy, or attempt to
//! validate that the configured policies redact correctly.

use redactor_reflect::DynamicMessage;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::redaction::Redactor;

/// Marker trait for types whose `slog` integration always emits redacted output.
///
/// This trait requires `slog::Value` so the type can be logged with slog.
/// The marker indicates that the type's `slog::Value` implementation produces
/// redacted output rather than raw values.
///
/// This trait is implemented only for carriers produced by a [`Redactor`].
/// It is not a blanket impl for raw types.
///
/// ```compile_fail
/// use redactor::slog::SlogRedacted;
///
/// fn assert_slog_redacted<T: SlogRedacted>() {}
///
/// assert_slog_redacted::<String>();
/// ```
pub trait SlogRedacted: SlogValue {}

impl<T: SlogRedacted + ?Sized> SlogRedacted for &T {}

/// A redacted message rendered as JSON, ready to be logged with `slog`.
#[derive(Debug, Clone)]
pub struct RedactedJson {
    value: JsonValue,
}

impl RedactedJson {
    /// Wraps an already-redacted JSON value.
    pub fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// Returns the redacted JSON value.
    pub fn value(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for RedactedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

impl SlogRedacted for RedactedJson {}

/// Extension trait for ergonomic slog logging of redacted messages as JSON.
///
/// ## Example
/// ```ignore
/// use redactor::slog::SlogRedactedExt;
///
/// info!(logger, "event"; "data" => redactor.slog_redacted(&message));
/// ```
pub trait SlogRedactedExt {
    /// Redacts a copy of `message` and returns a `slog::Value` that
    /// serializes as structured JSON.
    ///
    /// If redaction fails, the returned value stores a JSON string with the
    /// message `"Failed to redact value"`. The original message is never
    /// serialized.
    fn slog_redacted(&self, message: &DynamicMessage) -> RedactedJson;
}

impl SlogRedactedExt for Redactor {
    fn slog_redacted(&self, message: &DynamicMessage) -> RedactedJson {
        let json = self
            .redact_to_json(message)
            .unwrap_or_else(|err| JsonValue::String(format!("Failed to redact value: {err}")));
        RedactedJson::new(json)
    }
}
