//! Schema-driven redaction of sensitive fields in dynamic messages.
//!
//! This crate separates:
//! - **Sensitivity markers**: extension payloads attached to field descriptors
//!   naming which fields (and which map keys) are sensitive.
//! - **Redaction policies**: caller-supplied functions deciding what happens
//!   to a flagged field, map entry, or list.
//!
//! A [`Redactor`] walks a message in field number order, applies the
//! configured policy chains wherever a field carries the configured extension
//! identifier, and descends into nested messages, lists, and maps.
//!
//! What this crate does:
//! - dispatches flagged fields to field, map entry, and list policy chains
//! - ships clear policies that drop flagged values outright
//! - contains policy panics at the redaction call boundary
//! - provides integrations behind feature flags (`json`, `slog`, `tracing`)
//!
//! What it does not do:
//! - decide which fields are sensitive (field descriptors carry that)
//! - perform I/O or logging
//!
//! Descriptors and dynamic messages live in `redactor-reflect`, re-exported
//! from this crate as [`reflect`].
//!
//! # Example
//!
//! ```
//! use redactor::reflect::{
//!     DynamicMessage, ExtensionId, FieldDescriptor, Kind, MessageDescriptor,
//! };
//! use redactor::{Redactor, common_sensitive_keys};
//!
//! const SENSITIVE: ExtensionId = ExtensionId::from_static("sensitive");
//!
//! let descriptor = MessageDescriptor::builder("Login")
//!     .with_field(FieldDescriptor::new(1, "login", Kind::String))
//!     .with_field(
//!         FieldDescriptor::new(2, "password", Kind::String).with_extension(SENSITIVE, true),
//!     )
//!     .build()?;
//!
//! let mut message = DynamicMessage::new(descriptor);
//! message.set_field("login", "alice")?;
//! message.set_field("password", "hunter2")?;
//!
//! let redactor = Redactor::clearing(SENSITIVE)
//!     .with_key_extractor(common_sensitive_keys)
//!     .build()?;
//! redactor.redact(&mut message)?;
//!
//! assert!(message.get_field("password").is_none());
//! assert_eq!(
//!     message.get_field("login").and_then(|value| value.as_str()),
//!     Some("alice"),
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else,
    clippy::from_over_into
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

/// Descriptor and dynamic message types this crate operates on.
pub use redactor_reflect as reflect;

// Module declarations
pub mod policy;
mod redaction;
#[cfg(feature = "slog")]
pub mod slog;
#[cfg(feature = "tracing")]
pub mod tracing;

// Re-exports from policy module
pub use policy::{
    FieldPolicy, KeyExtractor, ListPolicy, MAP_KEYS_FIELD, MapEntryPolicy, SensitiveKeys,
    clear_field, clear_list, clear_map_entry, common_sensitive_keys, map_keys_extension,
};
// Re-exports from redaction module
pub use redaction::{Error, PolicyStage, Redactor, RedactorBuilder};
#[cfg(feature = "slog")]
pub use self::slog::{RedactedJson, SlogRedacted, SlogRedactedExt};
#[cfg(feature = "tracing")]
pub use self::tracing::TracingRedactedExt;
