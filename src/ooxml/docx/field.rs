/// Fields - dynamic content such as page numbers, dates and cross-references.
///
/// Both simple fields (`w:fldSimple`) and complex fields (a `w:fldChar`
/// begin/separate/end sequence spread across runs) end up as a [`Field`]
/// holding the instruction and the cached result content.
use crate::ooxml::docx::paragraph::{Inline, inlines_text};
use serde::Serialize;

/// How the field was encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    Simple,
    Complex,
}

/// A field in a Word document.
///
/// # Examples
///
/// ```rust
/// use longan::ooxml::docx::field::{Field, FieldKind};
///
/// let field = Field::new(" page \\* MERGEFORMAT ", Vec::new(), FieldKind::Complex);
/// assert_eq!(field.field_type(), "PAGE");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// First word of the instruction, uppercased
    field_type: String,
    /// The field instruction (e.g., "PAGE", "DATE \\@ \"MMMM d, yyyy\"")
    instruction: String,
    /// The cached result content
    result: Vec<Inline>,
    kind: FieldKind,
}

impl Field {
    pub fn new(instruction: impl Into<String>, result: Vec<Inline>, kind: FieldKind) -> Self {
        let instruction = instruction.into();
        Self {
            field_type: field_type(&instruction),
            instruction,
            result,
            kind,
        }
    }

    #[inline]
    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    #[inline]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    #[inline]
    pub fn result(&self) -> &[Inline] {
        &self.result
    }

    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Plain text of the cached result.
    pub fn text(&self) -> String {
        inlines_text(&self.result)
    }

    /// Switch argument of a `HYPERLINK` field (`HYPERLINK "url"` or
    /// `HYPERLINK \l "anchor"`).
    pub fn hyperlink_target(&self) -> Option<String> {
        if self.field_type != "HYPERLINK" {
            return None;
        }
        let rest = self
            .instruction
            .trim_start()
            .get("HYPERLINK".len()..)
            .unwrap_or_default()
            .trim();
        let (is_anchor, rest) = match rest.strip_prefix("\\l") {
            Some(anchor) => (true, anchor.trim_start()),
            None => (false, rest),
        };
        let target = match rest.strip_prefix('"') {
            Some(quoted) => quoted.split('"').next().unwrap_or_default(),
            None => rest.split_whitespace().next().unwrap_or_default(),
        };
        if target.is_empty() {
            return None;
        }
        Some(if is_anchor {
            format!("#{target}")
        } else {
            target.to_string()
        })
    }
}

/// Field type of an instruction: its first token, uppercased, or `UNKNOWN`
/// when the instruction is blank.
pub fn field_type(instruction: &str) -> String {
    instruction
        .split_whitespace()
        .next()
        .map(str::to_ascii_uppercase)
        .unwrap_or_else(|| "UNKNOWN".to_string())
}
