//! Domain error model.

use std::collections::BTreeMap;

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Field name -> ordered list of human-readable messages.
pub type FieldsErrors = BTreeMap<String, Vec<String>>;

/// A supplied identifier is not a valid UUID.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct InvalidUuidError {
    message: String,
}

impl InvalidUuidError {
    pub const DEFAULT_MESSAGE: &'static str = "ID must be a valid UUID";

    pub fn new() -> Self {
        Self::with_message(Self::DEFAULT_MESSAGE)
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for InvalidUuidError {
    fn default() -> Self {
        Self::new()
    }
}

/// Fail-fast validation failure produced by the fluent rule engine.
///
/// `Display` renders the message verbatim; callers compare on the text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Collect-all validation failure produced by the schema validator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Entity Validation Error")]
pub struct EntityValidationError {
    errors: FieldsErrors,
}

impl EntityValidationError {
    pub fn new(errors: FieldsErrors) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &FieldsErrors {
        &self.errors
    }

    /// Messages recorded for a single field, if it failed.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.errors.get(name).map(Vec::as_slice)
    }

    pub fn into_errors(self) -> FieldsErrors {
        self.errors
    }
}

/// Domain-level error.
///
/// Every variant is a deterministic failure of caller input. Nothing here is
/// retried or recovered internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A single property failed the fluent rule chain.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// One or more properties failed a schema; every violation is reported.
    #[error(transparent)]
    EntityValidation(#[from] EntityValidationError),

    /// An identifier was not a valid UUID.
    #[error(transparent)]
    InvalidId(#[from] InvalidUuidError),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(msg))
    }
}
