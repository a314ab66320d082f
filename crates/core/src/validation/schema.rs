//! Declarative, collect-all validation of a whole property bag.
//!
//! Where the fluent rule chain stops at the first broken rule, a schema checks every
//! declared field and reports every violated constraint at once.

use core::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{Properties, PropsValidator, is_absent, is_timestamp};
use crate::error::{EntityValidationError, FieldsErrors};

/// Key used for failures that belong to no single field (e.g. normalization).
pub const ROOT_FIELD: &str = "_root";

/// A single declarative constraint on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Not undefined, null or `""`.
    NotEmpty,
    IsString,
    IsBoolean,
    /// An RFC 3339 timestamp string.
    IsDate,
    /// A string of at most `n` characters.
    MaxLength(usize),
}

impl Constraint {
    fn holds(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (Constraint::NotEmpty, Some(Value::String(s))) => !s.is_empty(),
            (Constraint::NotEmpty, v) => !is_absent(v),
            (Constraint::IsString, v) => matches!(v, Some(Value::String(_))),
            (Constraint::IsBoolean, v) => matches!(v, Some(Value::Bool(_))),
            (Constraint::IsDate, Some(Value::String(s))) => is_timestamp(s),
            (Constraint::IsDate, _) => false,
            (Constraint::MaxLength(max), Some(Value::String(s))) => s.chars().count() <= *max,
            (Constraint::MaxLength(_), _) => false,
        }
    }

    fn message(&self, field: &str) -> String {
        match self {
            Constraint::NotEmpty => format!("{field} should not be empty"),
            Constraint::IsString => format!("{field} must be a string"),
            Constraint::IsBoolean => format!("{field} must be a boolean value"),
            Constraint::IsDate => format!("{field} must be a Date instance"),
            Constraint::MaxLength(max) => {
                format!("{field} must be shorter than or equal to {max} characters")
            }
        }
    }
}

/// Constraints declared for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldConstraints {
    optional: bool,
    constraints: Vec<Constraint>,
}

impl FieldConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip every constraint of this field when the value is undefined or null.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn not_empty(self) -> Self {
        self.with(Constraint::NotEmpty)
    }

    pub fn string(self) -> Self {
        self.with(Constraint::IsString)
    }

    pub fn boolean(self) -> Self {
        self.with(Constraint::IsBoolean)
    }

    pub fn date(self) -> Self {
        self.with(Constraint::IsDate)
    }

    pub fn max_length(self, max: usize) -> Self {
        self.with(Constraint::MaxLength(max))
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Messages of every violated constraint, in declaration order.
    fn violations(&self, field: &str, value: Option<&Value>) -> Vec<String> {
        if self.optional && is_absent(value) {
            return Vec::new();
        }
        self.constraints
            .iter()
            .filter(|c| !c.holds(value))
            .map(|c| c.message(field))
            .collect()
    }
}

/// Schema over a property bag, producing typed props `P` on success.
///
/// Fields not declared in the schema are not checked, but still reach `P`'s
/// deserializer, which applies defaults and rejects anything it cannot represent.
#[derive(Debug, Clone)]
pub struct SchemaValidator<P> {
    fields: Vec<(String, FieldConstraints)>,
    _props: PhantomData<fn() -> P>,
}

impl<P> Default for SchemaValidator<P> {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            _props: PhantomData,
        }
    }
}

impl<P> SchemaValidator<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or replace) the constraints of `name`.
    pub fn field(mut self, name: impl Into<String>, constraints: FieldConstraints) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = constraints,
            None => self.fields.push((name, constraints)),
        }
        self
    }

    /// Check every declared field, collecting all violations.
    pub fn check(&self, raw: &Properties) -> Result<(), EntityValidationError> {
        let errors: FieldsErrors = self
            .fields
            .iter()
            .filter_map(|(name, constraints)| {
                let violations = constraints.violations(name, raw.get(name));
                (!violations.is_empty()).then(|| (name.clone(), violations))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(EntityValidationError::new(errors))
        }
    }
}

impl<P: DeserializeOwned> SchemaValidator<P> {
    /// Check the bag, then normalize it into `P`.
    pub fn validate(&self, raw: &Properties) -> Result<P, EntityValidationError> {
        self.check(raw)?;
        serde_json::from_value(Value::Object(raw.clone())).map_err(|e| {
            let mut errors = FieldsErrors::new();
            errors.insert(ROOT_FIELD.to_string(), vec![e.to_string()]);
            EntityValidationError::new(errors)
        })
    }
}

impl<P: DeserializeOwned> PropsValidator<P> for SchemaValidator<P> {
    type Error = EntityValidationError;

    fn validate(&self, raw: &Properties) -> Result<P, Self::Error> {
        SchemaValidator::validate(self, raw)
    }
}
