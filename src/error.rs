use thiserror::Error;

/// Errors that can occur while computing portfolio figures
///
/// All of these are local computation failures. The same input always
/// produces the same error, so retrying is pointless.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Division by zero: {0}")]
    DivisionByZero(&'static str),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

pub type CalcResult<T> = Result<T, CalcError>;
