//! Value objects: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Immutable wrapper around a payload of type `T`.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (two value objects with same values are equal)
/// - **Entity**: Has identity (two entities with same ID are the same entity)
///
/// There is no way to mutate the payload once wrapped; to "modify" a value object,
/// build a new one.
///
/// ```ignore
/// let a = ValueObject::new(vec![1, 2, 3]);
/// let b = ValueObject::new(vec![1, 2, 3]);
/// assert_eq!(a, b); // equal by value, not identity
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueObject<T>(T);

impl<T> ValueObject<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for ValueObject<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

/// Scalars render as their plain text; objects and arrays render as JSON.
impl<T: Serialize> core::fmt::Display for ValueObject<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match serde_json::to_value(&self.0).map_err(|_| core::fmt::Error)? {
            Value::String(s) => f.write_str(&s),
            other => core::fmt::Display::fmt(&other, f),
        }
    }
}
