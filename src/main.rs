use anyhow::{Context, Result};
use clap::Parser;
use innkeeper::cli::{Cli, Commands};
use innkeeper::env_manager;
use log::{error, info};
use std::io::Read;

#[tokio::main]
async fn main() -> Result<()> {
    innkeeper::init_logger();

    if let Err(e) = env_manager::load_env_file() {
        error!("Failed to prepare .env file: {}", e);
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Process { config } => {
            let summary = innkeeper::run(config.as_deref()).await?;
            info!(
                "Answered {} inquiries ({} with availability, {} partial, {} for manual review), {} failed",
                summary.sent(),
                summary.availability,
                summary.partial,
                summary.manual_review,
                summary.send_failures
            );
        }
        Commands::Parse { file, today } => {
            let body = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut body = String::new();
                    std::io::stdin().read_to_string(&mut body).context("Failed to read stdin")?;
                    body
                }
            };
            println!("{}", innkeeper::parse_to_json(&body, today)?);
        }
    }
    Ok(())
}
