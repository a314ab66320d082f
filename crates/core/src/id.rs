//! Unique entity identifiers.

use core::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid, Variant};

use crate::error::InvalidUuidError;
use crate::value_object::ValueObject;

/// Length of the hyphenated `8-4-4-4-12` form.
const HYPHENATED_LEN: usize = 36;

/// Identifier of an entity: a validated UUID string.
///
/// The string is kept exactly as supplied (case included), so
/// `UniqueId::parse(s)?.as_str() == s` for every accepted `s`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UniqueId(ValueObject<String>);

impl UniqueId {
    /// Generate a fresh random (version 4) identifier from the thread-local RNG.
    pub fn new() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generate a fresh random identifier from the supplied RNG.
    ///
    /// Pass a seeded RNG in tests for deterministic ids.
    pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        let uuid = Builder::from_random_bytes(bytes).into_uuid();
        Self(ValueObject::new(uuid.hyphenated().to_string()))
    }

    /// Validate a caller-supplied identifier.
    pub fn parse(id: impl Into<String>) -> Result<Self, InvalidUuidError> {
        let id = id.into();
        if !is_valid(&id) {
            return Err(InvalidUuidError::new());
        }
        Ok(Self(ValueObject::new(id)))
    }

    /// Use `id` when present, otherwise generate one. An empty id counts as absent.
    pub fn from_optional(id: Option<&str>) -> Result<Self, InvalidUuidError> {
        match id {
            Some(id) if !id.is_empty() => Self::parse(id),
            _ => Ok(Self::new()),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.value()
    }

    pub fn as_uuid(&self) -> Result<Uuid, InvalidUuidError> {
        Uuid::try_parse(self.as_str()).map_err(|_| InvalidUuidError::new())
    }
}

impl Default for UniqueId {
    fn default() -> Self {
        Self::new()
    }
}

/// Hyphenated form, RFC 4122 variant and a version in `1..=5`, or the nil UUID.
pub fn is_valid(id: &str) -> bool {
    if id.len() != HYPHENATED_LEN {
        return false;
    }
    match Uuid::try_parse(id) {
        Ok(uuid) if uuid.is_nil() => true,
        Ok(uuid) => {
            uuid.get_variant() == Variant::RFC4122 && matches!(uuid.get_version_num(), 1..=5)
        }
        Err(_) => false,
    }
}

impl core::fmt::Display for UniqueId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UniqueId {
    type Err = InvalidUuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for UniqueId {
    type Error = InvalidUuidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for UniqueId {
    type Error = InvalidUuidError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<UniqueId> for String {
    fn from(value: UniqueId) -> Self {
        value.0.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rejects_malformed_id() {
        assert_eq!(UniqueId::parse("Fake id"), Err(InvalidUuidError::new()));
        assert!(UniqueId::parse("").is_err());
        assert!("d8bb2696a2e349a28e336782fc142855".parse::<UniqueId>().is_err());
        assert!(UniqueId::parse("{d8bb2696-a2e3-49a2-8e33-6782fc142855}").is_err());
    }

    #[test]
    fn rejects_bad_version_or_variant_nibbles() {
        // version 0
        assert!(UniqueId::parse("d8bb2696-a2e3-09a2-8e33-6782fc142855").is_err());
        // variant nibble `c`
        assert!(UniqueId::parse("d8bb2696-a2e3-49a2-ce33-6782fc142855").is_err());
    }

    #[test]
    fn accepts_uuid_passed_in() {
        let uuid = "d8bb2696-a2e3-49a2-8e33-6782fc142855";
        let id = UniqueId::parse(uuid).unwrap();
        assert_eq!(id.as_str(), uuid);
        assert_eq!(id.to_string(), uuid);
        assert_eq!(String::from(id), uuid);
    }

    #[test]
    fn keeps_supplied_casing() {
        let uuid = "D8BB2696-A2E3-49A2-8E33-6782FC142855";
        assert_eq!(UniqueId::try_from(uuid).unwrap().as_str(), uuid);
    }

    #[test]
    fn accepts_nil_uuid() {
        assert!(UniqueId::parse("00000000-0000-0000-0000-000000000000").is_ok());
    }

    #[test]
    fn generates_valid_id_when_absent() {
        let id = UniqueId::from_optional(None).unwrap();
        assert!(is_valid(id.as_str()));
        assert_eq!(id.as_uuid().unwrap().get_version_num(), 4);
        assert_ne!(UniqueId::new(), UniqueId::new());
    }

    #[test]
    fn from_optional_validates_supplied_id() {
        assert!(UniqueId::from_optional(Some("nope")).is_err());
        let id = UniqueId::from_optional(Some("d8bb2696-a2e3-49a2-8e33-6782fc142855")).unwrap();
        assert_eq!(id.as_str(), "d8bb2696-a2e3-49a2-8e33-6782fc142855");
    }

    #[test]
    fn from_optional_treats_empty_id_as_absent() {
        let id = UniqueId::from_optional(Some("")).unwrap();
        assert!(is_valid(id.as_str()));
        assert!(UniqueId::parse("").is_err());
    }

    #[test]
    fn seeded_rng_generates_deterministic_ids() {
        let a = UniqueId::generate_with(&mut StdRng::seed_from_u64(7));
        let b = UniqueId::generate_with(&mut StdRng::seed_from_u64(7));
        let c = UniqueId::generate_with(&mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn serializes_as_plain_string() {
        let uuid = "d8bb2696-a2e3-49a2-8e33-6782fc142855";
        let id = UniqueId::parse(uuid).unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!(uuid));

        let back: UniqueId = serde_json::from_str(&format!("\"{uuid}\"")).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<UniqueId>("\"Fake id\"").is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        // First character non-zero so the nil UUID never sneaks in.
        const BAD_VERSION: &str =
            "[1-9a-f][0-9a-f]{7}-[0-9a-f]{4}-[06-9a-f][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}";
        const BAD_VARIANT: &str =
            "[1-9a-f][0-9a-f]{7}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[0-7c-f][0-9a-f]{3}-[0-9a-f]{12}";
        const MIXED_CASE_V4: &str =
            "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-4[0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}";

        proptest! {
            /// Property: every generated id validates and survives a parse unchanged.
            #[test]
            fn generated_ids_always_validate(seed in any::<u64>()) {
                let id = UniqueId::generate_with(&mut StdRng::seed_from_u64(seed));
                prop_assert!(is_valid(id.as_str()));
                let reparsed = UniqueId::parse(id.as_str()).unwrap();
                prop_assert_eq!(reparsed, id);
            }

            /// Property: a version nibble outside 1..=5 is rejected.
            #[test]
            fn bad_version_nibble_is_rejected(s in BAD_VERSION) {
                prop_assert_eq!(UniqueId::parse(s), Err(InvalidUuidError::new()));
            }

            /// Property: a variant nibble outside 8..=b is rejected.
            #[test]
            fn bad_variant_nibble_is_rejected(s in BAD_VARIANT) {
                prop_assert_eq!(UniqueId::parse(s), Err(InvalidUuidError::new()));
            }

            /// Property: any well-formed v4 id, in any casing, is kept verbatim.
            #[test]
            fn valid_ids_are_kept_verbatim(s in MIXED_CASE_V4) {
                let id = UniqueId::parse(s.as_str()).unwrap();
                prop_assert_eq!(id.as_str(), s.as_str());
            }

            /// Property: strings that are not 36 characters long never validate.
            #[test]
            fn wrong_length_never_validates(s in "[0-9a-f-]{0,35}") {
                prop_assert!(UniqueId::parse(s).is_err());
            }
        }
    }
}
