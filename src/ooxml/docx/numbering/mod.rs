//! List numbering: definitions from `word/numbering.xml`, number formats and
//! the per-render counter engine.
pub mod definition;
pub mod engine;
pub mod format;

pub use definition::{
    AbstractNumbering, LevelOverride, LevelSuffix, MAX_LEVELS, Numbering, NumberingInstance,
    NumberingLevel,
};
pub use engine::{ListLabel, NumberingEngine};
pub use format::{BULLET, NumberFormat, to_alpha, to_roman};
