pub mod availability;
pub mod cli;
pub mod config;
pub mod env_manager;
pub mod error;
pub mod mail;
pub mod notifier;
pub mod parser;
pub mod processor;
pub mod reservation;
pub mod responder;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;
use std::path::Path;

/// Poll the mailbox once and answer every unseen inquiry
pub async fn run(config_path: Option<&Path>) -> Result<processor::RunSummary> {
    let config = Config::load(config_path)?;
    env_manager::check_env_vars();
    let credentials = env_manager::Credentials::from_env()?;

    info!("Starting reservation email processor");
    let mut processor = EmailProcessor::from_config(&config, credentials)?;
    processor.run_once().await.context("Failed to read the mailbox")
}

/// Run the extraction pipeline on one body and render the record as JSON
pub fn parse_to_json(body: &str, today: Option<NaiveDate>) -> Result<String> {
    let pipeline = match today {
        Some(today) => ExtractionPipeline::new().with_reference_date(today),
        None => ExtractionPipeline::new(),
    };
    let record = pipeline.run(body);
    serde_json::to_string_pretty(&record).context("Failed to serialize the reservation record")
}

pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

// Re-export commonly used types
pub use config::Config;
pub use parser::ExtractionPipeline;
pub use processor::{EmailProcessor, RunSummary};
pub use reservation::{Language, ReservationRequest, Status};
