use derive_more::derive::Display;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys consulted, in order, to resolve a record's identifier.
const ID_KEYS: &[&str] = &["id", "model"];

/// Keys consulted, in order, to resolve the owning organization.
const PROVIDER_KEYS: &[&str] = &["owned_by", "organization"];

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Hash, Eq, Display)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModelId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ModelId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Modality metadata as reported upstream: either one label or a list of
/// labels. Non-string list entries are tolerated and ignored.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Modality {
    Single(String),
    Many(Vec<Value>),
}

impl Modality {
    pub fn values(&self) -> Vec<&str> {
        match self {
            Modality::Single(value) => vec![value.as_str()],
            Modality::Many(values) => values.iter().filter_map(Value::as_str).collect(),
        }
    }
}

/// A single catalog record exactly as the upstream API returned it.
///
/// Upstream records are loosely shaped, so the raw object is kept intact and
/// every field is resolved on access. Accessors never fail: a missing or
/// mistyped field reads as absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelDescriptor(Map<String, Value>);

impl ModelDescriptor {
    /// Wraps a JSON value, returning `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<ModelId> {
        self.first_str(ID_KEYS).map(ModelId::new)
    }

    pub fn name(&self) -> Option<&str> {
        self.first_str(&["name"])
    }

    pub fn provider(&self) -> Option<&str> {
        self.first_str(PROVIDER_KEYS)
    }

    pub fn modality(&self) -> Option<Modality> {
        let modality = self.0.get("architecture")?.get("modality")?;
        Modality::deserialize(modality).ok()
    }

    /// Raw pricing value, whatever its shape.
    pub fn pricing(&self) -> Option<&Value> {
        self.0.get("pricing").filter(|value| !value.is_null())
    }

    /// Free-form tags declared on the record; non-string entries are skipped.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.0
            .get("tags")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    pub fn context_length(&self) -> Option<u64> {
        self.0.get("context_length").and_then(Value::as_u64)
    }

    /// First non-empty string found under `keys`, checked in order.
    fn first_str(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .filter_map(Value::as_str)
            .find(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn descriptor(value: Value) -> ModelDescriptor {
        ModelDescriptor::from_value(value).unwrap()
    }

    #[test]
    fn test_id_prefers_id_over_model() {
        let fixture = descriptor(json!({"id": "primary", "model": "fallback"}));
        let actual = fixture.id();
        let expected = Some(ModelId::new("primary"));
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_id_falls_back_when_id_is_empty() {
        let fixture = descriptor(json!({"id": "", "model": "fallback"}));
        let actual = fixture.id();
        let expected = Some(ModelId::new("fallback"));
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_id_ignores_non_string_values() {
        let fixture = descriptor(json!({"id": 42, "owned_by": "x"}));
        assert_eq!(fixture.id(), None);
    }

    #[test]
    fn test_provider_fallback_order() {
        let fixture = descriptor(json!({"organization": "org", "owned_by": "owner"}));
        assert_eq!(fixture.provider(), Some("owner"));

        let fixture = descriptor(json!({"organization": "org"}));
        assert_eq!(fixture.provider(), Some("org"));
    }

    #[test]
    fn test_modality_single_and_many() {
        let single = descriptor(json!({"architecture": {"modality": "text"}}));
        assert_eq!(single.modality().unwrap().values(), vec!["text"]);

        let many = descriptor(json!({"architecture": {"modality": ["text", 3, "image"]}}));
        assert_eq!(many.modality().unwrap().values(), vec!["text", "image"]);
    }

    #[test]
    fn test_modality_unrecognized_shape_is_absent() {
        let fixture = descriptor(json!({"architecture": {"modality": {"input": "text"}}}));
        assert_eq!(fixture.modality(), None);
    }

    #[test]
    fn test_tags_skip_non_strings() {
        let fixture = descriptor(json!({"tags": ["beta", null, 7, "NSFW"]}));
        let actual: Vec<_> = fixture.tags().collect();
        assert_eq!(actual, vec!["beta", "NSFW"]);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert_eq!(ModelDescriptor::from_value(json!(["id"])), None);
        assert_eq!(ModelDescriptor::from_value(json!("model-a")), None);
    }

    #[test]
    fn test_serializes_as_raw_record() {
        let raw = json!({"id": "model-a", "extra": {"nested": true}});
        let fixture = descriptor(raw.clone());
        let actual = serde_json::to_value(&fixture).unwrap();
        assert_eq!(actual, raw);
    }
}
