mod cli;

use ffscale::{config, processor::BatchProcessor};

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick a level from the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "ffscale=debug,ffscale_av=debug".to_string()
        } else {
            "ffscale=info,ffscale_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let config = config::load_config_or_default(cli.config.as_deref())?;
    let settings = cli.into_settings(&config);
    settings.validate()?;

    let summary = BatchProcessor::new(settings).run()?;
    tracing::info!("Done: {}", summary);

    Ok(())
}
