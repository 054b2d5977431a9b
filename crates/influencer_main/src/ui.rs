use colored::Colorize;
use influencer_domain::ModelSummary;

const NAME_WIDTH: usize = 36;
const PROVIDER_WIDTH: usize = 16;

/// One plain-text line per model: name, provider, context window and
/// capability tags.
pub fn format_model_row(model: &ModelSummary) -> String {
    let context = model
        .context_length
        .map(|length| length.to_string())
        .unwrap_or_else(|| "-".to_string());
    let capabilities = if model.capabilities.is_empty() {
        "-".to_string()
    } else {
        model.capabilities.iter().collect::<Vec<_>>().join(",")
    };
    let provider = if model.provider.is_empty() { "-" } else { &model.provider };

    format!(
        "{:<NAME_WIDTH$} {:<PROVIDER_WIDTH$} {:>8}  {}  ({})",
        truncate(&model.name, NAME_WIDTH),
        truncate(provider, PROVIDER_WIDTH),
        context,
        capabilities,
        model.id
    )
}

pub fn render_models(models: &[ModelSummary]) -> String {
    let header = format!(
        "{:<NAME_WIDTH$} {:<PROVIDER_WIDTH$} {:>8}  {}",
        "NAME", "PROVIDER", "CONTEXT", "CAPABILITIES"
    );
    let mut lines = vec![header.bold().bright_yellow().to_string()];
    lines.extend(models.iter().map(format_model_row));
    lines.join("\n")
}

/// Keeps only the models tagged with `capability`.
pub fn filter_by_capability(models: Vec<ModelSummary>, capability: &str) -> Vec<ModelSummary> {
    let capability = capability.trim().to_lowercase();
    models
        .into_iter()
        .filter(|model| model.capabilities.contains(&capability))
        .collect()
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
