//! Adapters for emitting redacted messages through `tracing`.
//!
//! Redacted output is logged as a display string holding the rendered JSON.
//! This works with any tracing subscriber but the output is flat text, not
//! structured data.
//!
//! # Example
//!
//! ```ignore
//! use redactor::tracing::TracingRedactedExt;
//!
//! tracing::info!(user = %redactor.tracing_redacted(&message));
//! ```

use redactor_reflect::DynamicMessage;
use tracing::field::{DisplayValue, display};

use crate::redaction::Redactor;

/// Extension trait for logging redacted messages as display strings.
pub trait TracingRedactedExt {
    /// Redacts a copy of `message` and wraps the rendered JSON for `tracing`
    /// logging as a display value.
    ///
    /// If redaction fails the display value holds the message
    /// `"Failed to redact value"` instead. The original message is never
    /// rendered.
    fn tracing_redacted(&self, message: &DynamicMessage) -> DisplayValue<String>;
}

impl TracingRedactedExt for Redactor {
    fn tracing_redacted(&self, message: &DynamicMessage) -> DisplayValue<String> {
        let text = match self.redact_to_json(message) {
            Ok(value) => value.to_string(),
            Err(err) => format!("Failed to redact value: {err}"),
        };
        display(text)
    }
}
