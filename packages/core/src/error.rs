// Типы ошибок

use crate::crypto::descriptor::Algorithm;
use crate::crypto::handshake::Role;
use thiserror::Error;

/// Rejections raised before any provider is touched or buffer acquired.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please provide input text")]
    EmptyText,

    #[error("Please provide a key")]
    MissingKey,

    #[error("Key must be exactly {expected} bytes long, got {actual}")]
    KeyLength { expected: usize, actual: usize },

    #[error("Key must be an alphabetic keyword with no spaces or numbers")]
    NonAlphabeticKeyword,

    #[error("Rail Fence key must be a number")]
    RailCountNotNumeric,

    #[error("Rail Fence key must be a number greater than 1, got {0}")]
    RailCountTooSmall(usize),

    #[error("Rail Fence key must be at most {max}")]
    RailCountTooLarge { max: usize },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {0} must be a decimal integer")]
    MalformedInteger(&'static str),

    #[error("Field {0} must be greater than zero")]
    NonPositiveInteger(&'static str),

    #[error("Point must look like \"(x, y)\"")]
    MalformedPoint,

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Key material does not fit {0}")]
    KeyShapeMismatch(Algorithm),

    #[error("Invalid domain parameter: {0}")]
    InvalidDomainParameter(&'static str),
}

/// Failures reported by a primitive provider or its loader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Unknown provider module: {0}")]
    UnknownModule(String),

    #[error("Failed to load provider: {0}")]
    LoadFailed(String),

    #[error("Failed to generate keys: {0}")]
    KeyGeneration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Other provider error: {0}")]
    Other(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    #[error("{algorithm} processing failed: {detail}")]
    PrimitiveProcessingFailed { algorithm: Algorithm, detail: String },

    #[error("Provider {module} unavailable: {source}")]
    ProviderUnavailable {
        module: String,
        #[source]
        source: ProviderError,
    },

    #[error("Provider {module} does not offer the {expected} capability")]
    ProviderMismatch {
        module: String,
        expected: &'static str,
    },

    #[error("Buffer allocation of {0} bytes failed")]
    BufferAllocationFailed(usize),

    #[error("Keys for party {0} have not been generated")]
    KeysNotGenerated(Role),

    #[error("{algorithm} does not support {operation}")]
    UnsupportedOperation {
        algorithm: Algorithm,
        operation: &'static str,
    },
}

impl CoreError {
    /// Wraps a provider error raised while an operation was already in flight.
    pub fn processing(algorithm: Algorithm, err: ProviderError) -> Self {
        CoreError::PrimitiveProcessingFailed {
            algorithm,
            detail: err.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
