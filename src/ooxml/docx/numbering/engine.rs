//! Stateful list counters for one render pass.
use crate::ooxml::docx::numbering::definition::{LevelSuffix, MAX_LEVELS, Numbering};
use crate::ooxml::docx::numbering::format::NumberFormat;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Counters {
    current: [u32; MAX_LEVELS],
    /// Value each level had when it last produced a label
    frozen: [u32; MAX_LEVELS],
}

impl Counters {
    fn seeded(starts: &[u32; MAX_LEVELS]) -> Self {
        Self {
            current: *starts,
            frozen: *starts,
        }
    }

    fn reset_below(&mut self, level: usize, starts: &[u32; MAX_LEVELS]) {
        for i in level + 1..MAX_LEVELS {
            self.current[i] = starts[i];
            self.frozen[i] = starts[i];
        }
    }
}

/// A computed list label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLabel {
    pub text: String,
    pub suffix: LevelSuffix,
}

/// Produces list labels in document order.
///
/// Counters live per numbering instance and advance on every call, so the
/// engine must see paragraphs in reading order and must be [`reset`] before
/// the same document is rendered again.
///
/// [`reset`]: NumberingEngine::reset
///
/// # Examples
///
/// ```rust
/// use longan::ooxml::docx::numbering::*;
///
/// let mut numbering = Numbering::new();
/// numbering.define(
///     AbstractNumbering::new("0")
///         .with_level(NumberingLevel::new(0, NumberFormat::Decimal))
///         .with_level(NumberingLevel::new(1, NumberFormat::Decimal)),
///     [NumberingInstance::new("1", "0")],
/// );
///
/// let mut engine = NumberingEngine::new(&numbering);
/// let labels: Vec<_> = [0, 0, 1, 0]
///     .into_iter()
///     .filter_map(|level| engine.format("1", level))
///     .collect();
/// assert_eq!(labels, ["1.", "2.", "2.1.", "3."]);
/// ```
#[derive(Debug)]
pub struct NumberingEngine<'a> {
    definitions: &'a Numbering,
    counters: HashMap<String, Counters>,
}

impl<'a> NumberingEngine<'a> {
    pub fn new(definitions: &'a Numbering) -> Self {
        Self {
            definitions,
            counters: HashMap::new(),
        }
    }

    #[inline]
    pub fn definitions(&self) -> &'a Numbering {
        self.definitions
    }

    /// Forget all counter state.
    pub fn reset(&mut self) {
        self.counters.clear();
    }

    /// Label text for the next paragraph at `level` of instance `num_id`.
    pub fn format(&mut self, num_id: &str, level: u8) -> Option<String> {
        self.label(num_id, level).map(|label| label.text)
    }

    /// Label and suffix for the next paragraph at `level` of instance
    /// `num_id`. Returns `None` for an unknown instance or undefined level.
    ///
    /// Level 0 yields `current[0]` and resets every deeper level. A deeper
    /// level yields the frozen values of its ancestors joined with its own
    /// current value; levels below it keep counting. Bullet levels advance
    /// the counters like any other level but print only the bullet glyph.
    pub fn label(&mut self, num_id: &str, level: u8) -> Option<ListLabel> {
        let lvl = level as usize;
        if lvl >= MAX_LEVELS {
            return None;
        }
        let definitions = self.definitions;
        let definition = definitions.level(num_id, level)?;

        let mut starts = [1u32; MAX_LEVELS];
        for (i, start) in starts.iter_mut().enumerate() {
            *start = definitions.start(num_id, i as u8);
        }

        let counters = self
            .counters
            .entry(num_id.to_string())
            .or_insert_with(|| Counters::seeded(&starts));

        let value = counters.current[lvl];
        let text = match definition.format {
            NumberFormat::Bullet | NumberFormat::None => definition.format.format(value),
            own_format => {
                let mut text = String::new();
                for i in 0..lvl {
                    let format = definitions
                        .level(num_id, i as u8)
                        .map(|l| l.format)
                        .filter(|f| !matches!(f, NumberFormat::Bullet | NumberFormat::None))
                        .unwrap_or_default();
                    text.push_str(&format.format(counters.frozen[i]));
                    text.push('.');
                }
                text.push_str(&own_format.format(value));
                text.push('.');
                text
            },
        };

        counters.frozen[lvl] = value;
        counters.current[lvl] = value.saturating_add(1);
        if lvl == 0 {
            counters.reset_below(0, &starts);
        }

        Some(ListLabel {
            text,
            suffix: definition.suffix,
        })
    }
}
