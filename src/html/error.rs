use thiserror::Error;

/// Failure to render one block.
///
/// A render error never aborts a conversion: the block is skipped and the
/// failure is recorded as a diagnostic.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Content nested too deeply: {depth} levels")]
    NestingTooDeep { depth: usize },
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;
