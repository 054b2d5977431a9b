use std::path::Path;

use anyhow::{Context as _, Result};
use colored::Colorize;
use influencer_domain::{resolve_model_alias, ImageRequest, ModelId, VideoRequest};
use influencer_provider::Client;
use tracing::debug;

use crate::cli::Command;
use crate::media::MediaReference;
use crate::ui::{filter_by_capability, render_models};

/// Executes one CLI command against the gateway and prints its result to
/// stdout.
pub async fn run(command: Command, client: &Client) -> Result<()> {
    match command {
        Command::Models { json, capability } => {
            let mut models = client.catalog().await?;
            if let Some(capability) = capability {
                models = filter_by_capability(models, &capability);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&models)?);
            } else {
                println!("{}", render_models(&models));
            }
        }
        Command::Text { model, prompt } => {
            let model = ModelId::new(resolve_model_alias(&model));
            let text = client.generate_text(&model, &prompt).await?;
            println!("{text}");
        }
        Command::Image {
            model,
            prompt,
            negative_prompt,
            width,
            height,
            steps,
            guidance,
            output,
        } => {
            let mut request = ImageRequest::new(resolve_model_alias(&model), prompt);
            request.negative_prompt = negative_prompt;
            request.width = width;
            request.height = height;
            request.steps = steps;
            request.guidance = guidance;

            let payload = client.generate_image(&request).await?;
            let media = MediaReference::from_image_payload(&payload)?;
            deliver(&media, output.as_deref()).await?;
        }
        Command::Video { model, prompt, duration, size, output } => {
            let mut request = VideoRequest::new(resolve_model_alias(&model), prompt);
            request.duration = duration;
            request.size = size;

            let payload = client.generate_video(&request).await?;
            let media = MediaReference::from_video_payload(&payload)?;
            deliver(&media, output.as_deref()).await?;
        }
    }
    Ok(())
}

/// Prints remote media as a URL. Inline media is written to `output` when
/// given, otherwise its base64 text is printed.
async fn deliver(media: &MediaReference, output: Option<&Path>) -> Result<()> {
    match (media, output) {
        (MediaReference::Remote(url), _) => {
            if output.is_some() {
                debug!(url = %url, "Media is hosted remotely, nothing written");
            }
            println!("{}", url);
        }
        (MediaReference::Inline(_), Some(path)) => {
            let bytes = media.decode()?;
            tokio::fs::write(path, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} {} ({} bytes)", "Saved".green(), path.display(), bytes.len());
        }
        (MediaReference::Inline(data), None) => println!("{data}"),
    }
    Ok(())
}
