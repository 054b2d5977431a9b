use anyhow::Result;
use clap::Parser;
use influencer_main::{init_logger, run, Cli};
use influencer_provider::{Client, GatewayConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level);

    let config = cli.apply(GatewayConfig::from_env()?);
    let client = Client::new(config)?;
    run(cli.command, &client).await
}
