//! Redaction traversal and entrypoints.
//!
//! This module provides the machinery for applying redaction:
//!
//! - **`redactor`**: The [`Redactor`] facade and its entrypoints
//! - **`builder`**: [`RedactorBuilder`] configuration and validation
//! - **`walk`**: Pre-order message traversal and policy dispatch
//! - **`error`**: The redaction error taxonomy
//!
//! Policy function types and the built-in clear policies live in
//! `crate::policy`.

mod builder;
mod error;
mod redactor;
mod walk;

// Re-export the builder
pub use builder::RedactorBuilder;
// Re-export the error taxonomy
pub use error::{Error, PolicyStage};
// Re-export the facade
pub use redactor::Redactor;
