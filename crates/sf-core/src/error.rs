/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while validating or building core entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A required form field was empty or whitespace only.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
