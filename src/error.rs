#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("word bank too small: need at least {needed} words, have {available}")]
    InsufficientBank { needed: usize, available: usize },
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
