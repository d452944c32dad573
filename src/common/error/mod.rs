//! Error and diagnostic types for Longan.
//!
//! Only failures that make a conversion impossible are reported as [`Error`].
//! Everything else (a missing styles part, a malformed footnote, a block that
//! fails to render) is recorded as a [`Diagnostic`] and the conversion
//! continues with an empty substitute.

pub mod diagnostics;
pub mod types;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use types::{Error, Result};
