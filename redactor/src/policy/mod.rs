//! Policy functions and sensitive-key extraction.
//!
//! This module provides what callers plug into a redactor:
//!
//! - **`functions`**: the three policy shapes ([`FieldPolicy`],
//!   [`MapEntryPolicy`], [`ListPolicy`]) and the built-in clear policies
//! - **`keys`**: the [`KeyExtractor`] contract for map fields, the
//!   [`SensitiveKeys`] capability, and the common payload shape
//!
//! Traversal and dispatch live in `crate::redaction`.

mod functions;
mod keys;

// Re-export policy shapes and built-ins
pub use functions::{
    FieldPolicy, ListPolicy, MapEntryPolicy, clear_field, clear_list, clear_map_entry,
};
// Re-export key extraction
pub use keys::{
    KeyExtractor, MAP_KEYS_FIELD, SensitiveKeys, common_sensitive_keys, map_keys_extension,
};
