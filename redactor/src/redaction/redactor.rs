//! The redactor facade.
//!
//! [`Redactor`] composes the configured policies with the traversal in
//! `walk` and owns the outermost call boundary: a panic raised anywhere
//! inside a policy is contained here and surfaced as a regular
//! [`Error::PolicyPanic`], never across the caller's frame.

use std::{
    any::Any,
    fmt,
    panic::{self, AssertUnwindSafe},
};

use redactor_reflect::{DynamicMessage, ExtensionId};

use crate::{
    policy::{
        FieldPolicy, KeyExtractor, ListPolicy, MapEntryPolicy, clear_field, clear_list,
        clear_map_entry,
    },
    redaction::{builder::RedactorBuilder, error::Error, walk},
};

/// Applies redaction policies to dynamic messages.
///
/// A redactor is built once, holds no per-call state, and may be shared
/// freely: concurrent [`redact`](Self::redact) calls on *different* messages
/// need no synchronization. The caller keeps ownership of every message;
/// in-place redaction borrows the target only for the duration of the call.
pub struct Redactor {
    extension_id: ExtensionId,
    field_policies: Vec<FieldPolicy>,
    map_policies: Vec<MapEntryPolicy>,
    list_policies: Vec<ListPolicy>,
    key_extractor: Option<KeyExtractor>,
}

impl Redactor {
    /// Starts building a redactor that looks for the given extension
    /// identifier on field descriptors.
    pub fn builder(extension_id: ExtensionId) -> RedactorBuilder {
        RedactorBuilder::new(extension_id)
    }

    /// Starts building a redactor pre-loaded with the built-in clear
    /// policies for all three structural kinds.
    ///
    /// Flagged singular fields are cleared, matched map entries removed, and
    /// flagged lists truncated to empty. Policies registered on the returned
    /// builder run after the clear policies.
    pub fn clearing(extension_id: ExtensionId) -> RedactorBuilder {
        Self::builder(extension_id)
            .with_field_policy(clear_field)
            .with_map_policy(clear_map_entry)
            .with_list_policy(clear_list)
    }

    pub(crate) fn from_parts(
        extension_id: ExtensionId,
        field_policies: Vec<FieldPolicy>,
        map_policies: Vec<MapEntryPolicy>,
        list_policies: Vec<ListPolicy>,
        key_extractor: Option<KeyExtractor>,
    ) -> Self {
        Self {
            extension_id,
            field_policies,
            map_policies,
            list_policies,
            key_extractor,
        }
    }

    /// Returns the extension identifier this redactor looks for.
    pub fn extension_id(&self) -> &ExtensionId {
        &self.extension_id
    }

    /// Redacts `message` in place.
    ///
    /// On failure the message may be left partially redacted: mutations
    /// applied before the failing step stay applied, and there is no
    /// rollback. Callers needing all-or-nothing semantics should use
    /// [`redact_clone`](Self::redact_clone) and discard the copy on failure.
    pub fn redact(&self, message: &mut DynamicMessage) -> Result<(), Error> {
        match panic::catch_unwind(AssertUnwindSafe(|| walk::redact_message(self, message))) {
            Ok(outcome) => outcome,
            Err(payload) => Err(Error::PolicyPanic {
                message: panic_text(payload),
            }),
        }
    }

    /// Redacts a deep copy of `message`, leaving the original untouched.
    ///
    /// On failure no copy is returned; the original is guaranteed unmodified
    /// either way.
    pub fn redact_clone(&self, message: &DynamicMessage) -> Result<DynamicMessage, Error> {
        let mut copy = message.clone();
        self.redact(&mut copy)?;
        Ok(copy)
    }

    /// Redacts a copy of `message` and renders it as JSON.
    #[cfg(feature = "json")]
    pub fn redact_to_json(&self, message: &DynamicMessage) -> Result<serde_json::Value, Error> {
        Ok(self.redact_clone(message)?.to_json())
    }

    pub(crate) fn field_policies(&self) -> &[FieldPolicy] {
        &self.field_policies
    }

    pub(crate) fn map_policies(&self) -> &[MapEntryPolicy] {
        &self.map_policies
    }

    pub(crate) fn list_policies(&self) -> &[ListPolicy] {
        &self.list_policies
    }

    pub(crate) fn key_extractor(&self) -> Option<&KeyExtractor> {
        self.key_extractor.as_ref()
    }
}

impl fmt::Debug for Redactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Redactor")
            .field("extension_id", &self.extension_id)
            .field("field_policies", &self.field_policies.len())
            .field("map_policies", &self.map_policies.len())
            .field("list_policies", &self.list_policies.len())
            .field("key_extractor", &self.key_extractor.is_some())
            .finish()
    }
}

/// Extracts a human-readable message from a panic payload.
fn panic_text(payload: Box<dyn Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}
