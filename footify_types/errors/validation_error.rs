use thiserror::Error;

/// Rejected form input. The messages are shown inline next to the field.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid number")]
    NotANumber,

    #[error("Age must be 14 or greater")]
    AgeTooLow,

    #[error("Age must be 50 or less")]
    AgeTooHigh,

    #[error("Shirt number must be 0 or greater")]
    ShirtNumberTooLow,

    #[error("Shirt number must be 99 or less")]
    ShirtNumberTooHigh,

    #[error("Please enter a name")]
    NameRequired,

    #[error("{0} is required")]
    MissingField(&'static str),
}
