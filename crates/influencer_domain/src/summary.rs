use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{classify_capabilities, CapabilitySet, ModelDescriptor, ModelId};

/// Condensed view of a catalog record, shaped for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub id: ModelId,
    pub name: String,
    pub provider: String,
    pub capabilities: CapabilitySet,
    pub context_length: Option<u64>,
    pub pricing: Option<Value>,
}

impl ModelSummary {
    /// Returns `None` when the record has no usable identifier.
    pub fn from_descriptor(model: &ModelDescriptor) -> Option<Self> {
        let id = model.id()?;
        Some(Self {
            name: model.name().unwrap_or(id.as_str()).to_string(),
            provider: model.provider().unwrap_or_default().to_string(),
            capabilities: classify_capabilities(model),
            context_length: model.context_length(),
            pricing: model.pricing().cloned(),
            id,
        })
    }
}

/// Summarizes a catalog, dropping records without an identifier and ordering
/// the rest by display name, case-insensitively. Equal names keep their input
/// order.
pub fn summarize_models(models: &[ModelDescriptor]) -> Vec<ModelSummary> {
    let mut summaries: Vec<ModelSummary> = models
        .iter()
        .filter_map(ModelSummary::from_descriptor)
        .collect();
    summaries.sort_by_cached_key(|summary| summary.name.to_lowercase());
    summaries
}
