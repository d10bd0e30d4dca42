// digipin/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug digipin validate ... pour voir les détails
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Settings + adapters (Infra), then the service (Application)
    let ctx = Context::load(&cli.config_dir, cli.offline)?;

    match cli.command {
        Commands::Encode { lat, lon, user } => {
            commands::encode::execute(&ctx, lat, lon, user).await?;
        }
        Commands::Consent { user, action } => {
            commands::consent::execute(&ctx, user, action).await?;
        }
        Commands::Validate {
            user,
            lat,
            lon,
            address,
            digipin,
            consent_id,
        } => {
            commands::validate::execute(
                &ctx,
                user,
                lat,
                lon,
                address.into(),
                digipin,
                consent_id,
            )
            .await?;
        }
        Commands::Status { request_id } => {
            commands::status::execute(&ctx, request_id).await?;
        }
        Commands::Revoke { consent_id } => {
            commands::revoke::execute(&ctx, consent_id).await?;
        }
        Commands::Audit {
            user,
            limit,
            export,
        } => {
            commands::audit::execute(&ctx, user, limit, export).await?;
        }
        // Gazetteer only, never reaches the backend
        Commands::Suggest { address, max } => {
            commands::suggest::execute(address.into(), max)?;
        }
    }

    Ok(())
}
