//! Fluent, fail-fast validation of a single property.
//!
//! ```ignore
//! ValidatorRules::field(&props, "name")
//!     .required()?
//!     .string()?
//!     .max_length(255)?;
//! ```
//!
//! Each rule consumes the validator and hands it back on success, so rules run in
//! the order they are chained and the first failure ends the chain.
//!
//! Only `required()` enforces presence. Every other rule passes on an absent
//! (missing key) or `null` value, which is what makes `.string().max_length(n)`
//! usable for optional fields.

use serde_json::Value;

use super::{Properties, is_timestamp};
use crate::error::ValidationError;

pub type RuleResult<'a> = Result<ValidatorRules<'a>, ValidationError>;

/// A rule chain bound to one value and the name of the property it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatorRules<'a> {
    value: Option<&'a Value>,
    property: &'a str,
}

impl<'a> ValidatorRules<'a> {
    /// Bind a chain to `value`. `None` stands for an undefined value.
    pub fn values(value: Option<&'a Value>, property: &'a str) -> Self {
        Self { value, property }
    }

    /// Bind a chain to the `property` key of a property bag.
    pub fn field(props: &'a Properties, property: &'a str) -> Self {
        Self::values(props.get(property), property)
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }

    pub fn property(&self) -> &'a str {
        self.property
    }

    /// Fails on undefined, `null` and `""`. `0` and `false` are present values.
    pub fn required(self) -> RuleResult<'a> {
        let empty = match self.value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        };
        if empty {
            return Err(self.fail(format!("The {} is required", self.property)));
        }
        Ok(self)
    }

    pub fn string(self) -> RuleResult<'a> {
        match self.value {
            Some(v) if !v.is_null() && !v.is_string() => {
                Err(self.fail(format!("The {} must be a string", self.property)))
            }
            _ => Ok(self),
        }
    }

    /// Fails on strings longer than `max` characters (Unicode scalar values).
    /// Non-string values are left to `string()`.
    pub fn max_length(self, max: usize) -> RuleResult<'a> {
        match self.value {
            Some(Value::String(s)) if s.chars().count() > max => Err(self.fail(format!(
                "The {} must be less or equal than {} characters",
                self.property, max
            ))),
            _ => Ok(self),
        }
    }

    /// Only JSON `true`/`false` pass; `"true"` and `1` do not.
    pub fn boolean(self) -> RuleResult<'a> {
        match self.value {
            Some(v) if !v.is_null() && !v.is_boolean() => {
                Err(self.fail(format!("The {} must be a boolean", self.property)))
            }
            _ => Ok(self),
        }
    }

    /// Expects an RFC 3339 timestamp string (years past 9999 carry a sign).
    pub fn date(self) -> RuleResult<'a> {
        let valid = match self.value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => is_timestamp(s),
            Some(_) => false,
        };
        if !valid {
            return Err(self.fail(format!("The {} must be a date", self.property)));
        }
        Ok(self)
    }

    fn fail(&self, message: String) -> ValidationError {
        ValidationError::new(message)
    }
}
