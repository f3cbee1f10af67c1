use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ThermoError {
    #[error("Invalid state access: {0}")]
    InvalidStateAccess(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Unknown species: {0}")]
    UnknownSpecies(String),
    #[error("Composition vector has wrong length: expected {expected}, got {got}")]
    SizeMismatch { expected: usize, got: usize },
}
