//! Categories domain module.
//!
//! This crate contains the `Category` entity and its validators, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod category;
pub mod validator;

pub use category::{Category, CategoryProperties, NAME_MAX_LENGTH, validate_properties};
pub use validator::{CategoryValidator, CategoryValidatorFactory};
