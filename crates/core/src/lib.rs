//! `catalog-core` — domain seedwork for the catalog.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, value objects, the entity base and the property validators that
//! keep entities valid.

pub mod entity;
pub mod error;
pub mod id;
pub mod validation;
pub mod value_object;

pub use entity::{Entity, EntityBase};
pub use error::{
    DomainError, DomainResult, EntityValidationError, FieldsErrors, InvalidUuidError,
    ValidationError,
};
pub use id::UniqueId;
pub use validation::{
    Constraint, FieldConstraints, Properties, PropsValidator, SchemaValidator, ValidatorRules,
};
pub use value_object::ValueObject;
