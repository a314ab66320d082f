use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use catalog_core::{
    DomainResult, Entity, EntityBase, Properties, UniqueId, ValidationError,
    ValidatorRules,
};

/// Longest accepted category name, in characters.
pub const NAME_MAX_LENGTH: usize = 255;

/// Validated state of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProperties {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_is_active", deserialize_with = "null_as_active")]
    pub is_active: bool,
    #[serde(default = "Utc::now", deserialize_with = "null_as_now")]
    pub created_at: DateTime<Utc>,
}

fn default_is_active() -> bool {
    true
}

fn null_as_active<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(d)?.unwrap_or_else(default_is_active))
}

fn null_as_now<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    Ok(Option::<DateTime<Utc>>::deserialize(d)?.unwrap_or_else(Utc::now))
}

impl CategoryProperties {
    /// Active, without description, created now.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_active: default_is_active(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Raw bag form, as the validators see it.
    pub fn to_raw(&self) -> Properties {
        let mut raw = Properties::new();
        raw.insert("name".to_string(), Value::from(self.name.as_str()));
        raw.insert(
            "description".to_string(),
            self.description.as_deref().map_or(Value::Null, Value::from),
        );
        raw.insert("is_active".to_string(), Value::Bool(self.is_active));
        raw.insert(
            "created_at".to_string(),
            Value::from(self.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        );
        raw
    }
}

/// Fail-fast rule set shared by construction and `update`.
pub fn validate_properties(raw: &Properties) -> Result<CategoryProperties, ValidationError> {
    ValidatorRules::field(raw, "name")
        .required()?
        .string()?
        .max_length(NAME_MAX_LENGTH)?;
    ValidatorRules::field(raw, "description").string()?;
    ValidatorRules::field(raw, "is_active").boolean()?;
    ValidatorRules::field(raw, "created_at").date()?;

    serde_json::from_value(Value::Object(raw.clone()))
        .map_err(|e| ValidationError::new(e.to_string()))
}

/// Entity: Category.
///
/// Always valid: every constructor and `update` run [`validate_properties`] before
/// anything is stored, and a failed `update` leaves the category as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    entity: EntityBase<CategoryProperties>,
}

impl Category {
    pub fn new(props: CategoryProperties, id: Option<UniqueId>) -> DomainResult<Self> {
        Self::from_raw(&props.to_raw(), id)
    }

    /// Build from an untyped bag (e.g. a decoded request body).
    pub fn from_raw(raw: &Properties, id: Option<UniqueId>) -> DomainResult<Self> {
        let entity = EntityBase::<CategoryProperties>::create(raw, id, &validate_properties)?;
        Ok(Self { entity })
    }

    pub fn id(&self) -> &UniqueId {
        self.entity.id()
    }

    pub fn props(&self) -> &CategoryProperties {
        self.entity.props()
    }

    pub fn name(&self) -> &str {
        &self.props().name
    }

    pub fn description(&self) -> Option<&str> {
        self.props().description.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.props().is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.props().created_at
    }

    pub fn update(&mut self, name: &str, description: Option<&str>) -> DomainResult<()> {
        self.update_raw(
            &Value::from(name),
            &description.map_or(Value::Null, Value::from),
        )
    }

    /// Replace name and description together, or neither.
    pub fn update_raw(&mut self, name: &Value, description: &Value) -> DomainResult<()> {
        let mut raw = self.props().to_raw();
        raw.insert("name".to_string(), name.clone());
        raw.insert("description".to_string(), description.clone());
        self.entity.replace(&raw, &validate_properties)?;
        Ok(())
    }

    pub fn activate(&mut self) {
        self.entity.modify_unchecked(|p| p.is_active = true);
        tracing::debug!(category_id = %self.id(), "category activated");
    }

    pub fn deactivate(&mut self) {
        self.entity.modify_unchecked(|p| p.is_active = false);
        tracing::debug!(category_id = %self.id(), "category deactivated");
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        self.entity.to_json()
    }
}

impl Entity for Category {
    type Id = UniqueId;

    fn id(&self) -> &Self::Id {
        self.entity.id()
    }
}
