//! Degraded-fidelity diagnostics.
//!
//! A [`Diagnostics`] sink is shared by reference between the part loaders,
//! which may run on different threads, and the renderer.
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;

/// What kind of degradation a diagnostic describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// An optional part is absent from the package
    MissingPart,
    /// A part exists but could not be read or parsed
    MalformedPart,
    /// A single content element was dropped while building the tree
    SkippedElement,
    /// A top-level block failed to render and was left out of the markup
    RenderFailure,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingPart => "missing-part",
            Self::MalformedPart => "malformed-part",
            Self::SkippedElement => "skipped-element",
            Self::RenderFailure => "render-failure",
        }
    }
}

/// A recorded degradation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    part: String,
    kind: DiagnosticKind,
    message: String,
}

impl Diagnostic {
    pub fn new(part: impl Into<String>, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            part: part.into(),
            kind,
            message: message.into(),
        }
    }

    /// Part name the diagnostic refers to.
    #[inline]
    pub fn part(&self) -> &str {
        &self.part
    }

    #[inline]
    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.as_str(), self.part, self.message)
    }
}

/// Thread-safe collector of [`Diagnostic`]s.
///
/// Every recorded entry is also emitted as a `tracing` warning.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn record(&self, part: impl Into<String>, kind: DiagnosticKind, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(part, kind, message);
        tracing::warn!(
            part = %diagnostic.part,
            kind = diagnostic.kind.as_str(),
            "{}",
            diagnostic.message
        );
        self.entries.lock().push(diagnostic);
    }

    /// Append already-built diagnostics.
    pub fn extend(&self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.entries.lock().extend(diagnostics);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Clone out the current entries.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries.into_inner()
    }
}
