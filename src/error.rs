use thiserror::Error;

/// Errors raised while composing text content.
///
/// Layout and rendering never fail; content that does not fit is truncated
/// with an ellipsis instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("template has {placeholders} placeholder(s) but {params} parameter(s) were given")]
    Arity { placeholders: usize, params: usize },
}

pub type Result<T> = std::result::Result<T, TextError>;
