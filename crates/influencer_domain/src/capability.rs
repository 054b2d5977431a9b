use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ModelDescriptor;

/// Pricing dimensions that imply a capability when billed at a nonzero rate.
const PRICED_CAPABILITIES: &[(&str, &[&str])] = &[
    ("image", &["image", "image_generation"]),
    ("video", &["video"]),
    ("text", &["input", "output"]),
];

/// Lowercase capability tags, unique and lexicographically ordered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<String>);

impl CapabilitySet {
    pub fn insert(&mut self, tag: impl AsRef<str>) -> bool {
        self.0.insert(tag.as_ref().to_lowercase())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(&tag.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::default();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// Derives capability tags for a catalog record from its declared modality,
/// its pricing table and its free-form tags.
pub fn classify_capabilities(model: &ModelDescriptor) -> CapabilitySet {
    let mut capabilities = CapabilitySet::default();

    if let Some(modality) = model.modality() {
        for value in modality.values() {
            capabilities.insert(value);
        }
    }

    if let Some(pricing) = model.pricing().and_then(Value::as_object) {
        for (tag, dimensions) in PRICED_CAPABILITIES {
            let billed = dimensions
                .iter()
                .filter_map(|dimension| pricing.get(*dimension))
                .any(is_nonzero);
            if billed {
                capabilities.insert(tag);
            }
        }
    }

    for tag in model.tags() {
        capabilities.insert(tag);
    }

    capabilities
}

/// A price counts only if it reads as a number other than zero. Nested tables
/// count if any entry inside them does.
fn is_nonzero(value: &Value) -> bool {
    match value {
        Value::Number(number) => number.as_f64().is_some_and(nonzero_amount),
        Value::String(text) => text.trim().parse::<f64>().is_ok_and(nonzero_amount),
        Value::Object(entries) => entries.values().any(is_nonzero),
        Value::Array(entries) => entries.iter().any(is_nonzero),
        Value::Bool(_) | Value::Null => false,
    }
}

fn nonzero_amount(amount: f64) -> bool {
    !amount.is_nan() && amount != 0.0
}
