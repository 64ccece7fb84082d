//! Error types for letter-value calculations

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum NumerologyError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("Unknown alphabet: {0}")]
    UnknownAlphabet(String),
    #[error("Unknown calculation variant: {0}")]
    UnknownVariant(String),
    #[error("Unknown variation policy: {0}")]
    UnknownPolicy(String),
}
