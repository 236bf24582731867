use anyhow::{Context, Result};
use buildstamp::{BuildstampConfig, Cli, TimestampHeaderEmitter};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for the confirmation line
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buildstamp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = BuildstampConfig::load(cli).context("Failed to load configuration")?;
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Configuration error")?;

    let clock = config
        .clock()
        .map_err(anyhow::Error::msg)
        .context("Configuration error")?;

    // validate() guarantees the project directory is set
    let project_dir = config
        .project_dir
        .as_deref()
        .context("No project directory provided")?;

    tracing::debug!("Project directory: {}", project_dir.display());

    let report = TimestampHeaderEmitter::new(config.header.clone())
        .emit(project_dir, clock.as_ref())
        .context("Failed to generate build timestamp header")?;

    println!("{}", report.confirmation_line());

    Ok(())
}
