//! Schema-based (collect-all) validation of category properties.
//!
//! Intended for boundaries that want every problem with an input reported at once,
//! e.g. mapping a request body to a field -> messages error response.

use catalog_core::{FieldConstraints, SchemaValidator};

use crate::category::{CategoryProperties, NAME_MAX_LENGTH};

pub type CategoryValidator = SchemaValidator<CategoryProperties>;

pub struct CategoryValidatorFactory;

impl CategoryValidatorFactory {
    pub fn create() -> CategoryValidator {
        SchemaValidator::new()
            .field(
                "name",
                FieldConstraints::new()
                    .not_empty()
                    .string()
                    .max_length(NAME_MAX_LENGTH),
            )
            .field("description", FieldConstraints::new().optional().string())
            .field("is_active", FieldConstraints::new().optional().boolean())
            .field("created_at", FieldConstraints::new().optional().date())
    }
}
