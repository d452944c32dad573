//! Common types and utilities shared by the package reader, the
//! WordprocessingML model and the HTML renderer.

pub mod error;
pub mod metadata;
pub mod unit;
pub mod xml;

pub use error::{Diagnostic, DiagnosticKind, Diagnostics, Error, Result};
pub use metadata::Metadata;
