//! Entities: identity + continuity across state changes.
//!
//! [`Entity`] is the minimal trait; [`EntityBase`] is the shared building block that
//! keeps an entity's properties valid at all times. Both construction and every
//! validated mutation go through a [`PropsValidator`] supplied by the concrete
//! entity type, and a failed validation never touches stored state.

use serde::Serialize;
use serde_json::Value;

use crate::id::UniqueId;
use crate::validation::{Properties, PropsValidator};

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Identifier + validated properties.
///
/// Equality is by identifier only: two instances with the same id are the same
/// logical entity whatever their properties.
#[derive(Debug, Clone)]
pub struct EntityBase<P> {
    id: UniqueId,
    props: P,
}

impl<P> EntityBase<P> {
    /// Validate `raw` and build the entity, generating an id when none is given.
    pub fn create<V>(
        raw: &Properties,
        id: Option<UniqueId>,
        validator: &V,
    ) -> Result<Self, V::Error>
    where
        V: PropsValidator<P>,
    {
        let props = validator.validate(raw)?;
        let id = id.unwrap_or_default();
        tracing::debug!(entity_id = %id, "entity created");
        Ok(Self { id, props })
    }

    pub fn id(&self) -> &UniqueId {
        &self.id
    }

    pub fn props(&self) -> &P {
        &self.props
    }

    pub fn into_props(self) -> P {
        self.props
    }

    /// Validate `raw` and, only if it passes, replace the stored properties.
    pub fn replace<V>(&mut self, raw: &Properties, validator: &V) -> Result<(), V::Error>
    where
        V: PropsValidator<P>,
    {
        self.props = validator.validate(raw)?;
        tracing::debug!(entity_id = %self.id, "entity updated");
        Ok(())
    }

    /// Apply a change that cannot break validity (e.g. flipping a boolean flag).
    ///
    /// No validator runs here; callers own the invariant for what `f` does.
    pub fn modify_unchecked(&mut self, f: impl FnOnce(&mut P)) {
        f(&mut self.props);
    }
}

impl<P: Serialize> EntityBase<P> {
    /// `{ "id": <id>, ...props }`.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        let mut out = Properties::new();
        out.insert("id".to_string(), Value::String(self.id.to_string()));
        match serde_json::to_value(&self.props)? {
            Value::Object(props) => out.extend(props),
            other => {
                out.insert("props".to_string(), other);
            }
        }
        Ok(Value::Object(out))
    }
}

impl<P> PartialEq for EntityBase<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P> Eq for EntityBase<P> {}

impl<P> Entity for EntityBase<P> {
    type Id = UniqueId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
