//! Runtime message descriptors and dynamic values.
//!
//! This crate separates:
//! - **Descriptors**: immutable schema metadata - message types, field kinds
//!   and cardinalities, and caller-defined extension payloads attached to
//!   fields (e.g. a sensitivity marker).
//! - **Values**: mutable field storage - [`DynamicMessage`] instances whose
//!   writes are checked against their descriptor, plus narrow list and map
//!   mutation handles.
//!
//! What this crate does:
//! - builds and validates message descriptors at runtime
//! - stores, reads, and mutates message field values with explicit presence
//! - renders dynamic values as JSON behind the `json` feature
//!
//! What it does not do:
//! - parse any schema language or generate descriptors from one
//! - interpret extension payloads (consumers such as the `redactor` crate do)
//! - perform I/O or logging
//!
//! The `redactor` crate drives its traversal entirely through this surface.

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

// Module declarations
mod descriptor;
mod error;
#[cfg(feature = "json")]
mod json;
mod message;
mod value;

// Re-export descriptor types
pub use descriptor::{
    Cardinality, ExtensionId, ExtensionValue, FieldDescriptor, Kind, MessageDescriptor,
    MessageDescriptorBuilder,
};
// Re-export error types
pub use error::ReflectError;
// Re-export message and value types
pub use message::DynamicMessage;
pub use value::{ListValue, MapKey, MapValue, Value};
