/// Short aliases for frequently used image models.
pub const MODEL_PRESETS: &[(&str, &str)] = &[
    ("sdxl", "stabilityai/sdxl"),
    ("sdxl-turbo", "stabilityai/sdxl-turbo"),
    ("flux", "black-forest-labs/flux-1.1-pro"),
    ("flux-dev", "black-forest-labs/flux-dev"),
    ("playground-v25", "playgroundai/playground-v2.5"),
    ("sdxl-lightning", "luma-photon/stable-diffusion-xl-lightning"),
];

/// Expands a preset alias (case-insensitive) to its model id. Unknown input is
/// returned trimmed; blank input is returned untouched.
pub fn resolve_model_alias(model: &str) -> String {
    let alias = model.trim().to_lowercase();
    if alias.is_empty() {
        return model.to_string();
    }
    MODEL_PRESETS
        .iter()
        .find(|(name, _)| *name == alias)
        .map(|(_, id)| id.to_string())
        .unwrap_or_else(|| model.trim().to_string())
}

pub fn model_presets_help() -> String {
    MODEL_PRESETS
        .iter()
        .map(|(alias, id)| format!("{alias} → {id}"))
        .collect::<Vec<_>>()
        .join(", ")
}
