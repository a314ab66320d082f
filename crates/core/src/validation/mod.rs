//! Property validation: a fail-fast fluent rule chain and a collect-all schema.
//!
//! Entities hand one of these to the entity base as a [`PropsValidator`]. An entity
//! type should pick one strategy and use it for all of its fields.

pub mod rules;
pub mod schema;

pub use rules::{RuleResult, ValidatorRules};
pub use schema::{Constraint, FieldConstraints, SchemaValidator};

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

/// Raw property bag. A missing key is an undefined value, `Value::Null` is null.
pub type Properties = Map<String, Value>;

/// Validation strategy: check a raw bag and normalize it into typed props `P`.
pub trait PropsValidator<P> {
    type Error;

    fn validate(&self, raw: &Properties) -> Result<P, Self::Error>;
}

impl<P, E, F> PropsValidator<P> for F
where
    F: Fn(&Properties) -> Result<P, E>,
{
    type Error = E;

    fn validate(&self, raw: &Properties) -> Result<P, E> {
        self(raw)
    }
}

pub(crate) fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Accepts exactly what `chrono`'s serde support deserializes into a `DateTime`,
/// including signed years outside `0..=9999`.
pub(crate) fn is_timestamp(s: &str) -> bool {
    s.parse::<DateTime<FixedOffset>>().is_ok()
}
