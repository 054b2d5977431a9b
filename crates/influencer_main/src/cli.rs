use std::path::PathBuf;
use std::time::Duration;

use clap::{value_parser, Parser, Subcommand};
use influencer_provider::GatewayConfig;

use crate::log::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "influencer",
    version,
    about = "Generate text, images and video through the model gateway"
)]
pub struct Cli {
    /// Override the gateway base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API key; falls back to OPENROUTER_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true, value_name = "SECS", value_parser = parse_timeout)]
    pub timeout: Option<f64>,

    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List available models.
    Models {
        /// Print the catalog as JSON.
        #[arg(long)]
        json: bool,

        /// Only show models with this capability tag.
        #[arg(long)]
        capability: Option<String>,
    },

    /// Generate text from a chat model.
    Text {
        #[arg(long)]
        model: String,
        prompt: String,
    },

    /// Generate an image.
    Image {
        /// Model id or preset alias (sdxl, sdxl-turbo, flux, flux-dev, ...).
        #[arg(long)]
        model: String,
        prompt: String,
        #[arg(long)]
        negative_prompt: Option<String>,
        #[arg(long, value_parser = value_parser!(u32).range(256..=2048))]
        width: Option<u32>,
        #[arg(long, value_parser = value_parser!(u32).range(256..=2048))]
        height: Option<u32>,
        #[arg(long, value_parser = value_parser!(u32).range(1..=100))]
        steps: Option<u32>,
        #[arg(long, value_parser = parse_guidance)]
        guidance: Option<f64>,
        /// Write inline image data to this file.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Generate a video clip.
    Video {
        #[arg(long)]
        model: String,
        prompt: String,
        /// Clip length in seconds.
        #[arg(long, value_parser = parse_duration)]
        duration: Option<f64>,
        /// Resolution, e.g. 1024x576.
        #[arg(long)]
        size: Option<String>,
        /// Write inline video data to this file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Applies command-line overrides on top of the environment configuration.
    pub fn apply(&self, mut config: GatewayConfig) -> GatewayConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = Some(api_key.clone());
        }
        if let Some(timeout) = self.timeout {
            config.timeout = Duration::from_secs_f64(timeout);
        }
        config
    }
}

fn parse_bounded(value: &str, min: f64, max: f64) -> Result<f64, String> {
    let number: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (min..=max).contains(&number) {
        Ok(number)
    } else {
        Err(format!("{number} is not in {min}..={max}"))
    }
}

fn parse_guidance(value: &str) -> Result<f64, String> {
    parse_bounded(value, 0.0, 50.0)
}

fn parse_duration(value: &str) -> Result<f64, String> {
    parse_bounded(value, 1.0, 60.0)
}

fn parse_timeout(value: &str) -> Result<f64, String> {
    parse_bounded(value, 0.0, f64::from(u32::MAX))
}
