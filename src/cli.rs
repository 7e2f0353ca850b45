use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Innkeeper - reads hotel reservation inquiries and answers them with live availability
#[derive(Debug, Parser)]
#[command(name = "innkeeper")]
#[command(about = "Reads hotel reservation inquiry emails in English and Greek and answers them", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Poll the configured mailbox once and answer every unseen inquiry
    Process {
        /// Configuration file (defaults to INNKEEPER_CONFIG_PATH or the platform config directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Extract a reservation from one email body and print it as JSON
    Parse {
        /// File holding the email body (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Resolve dates as if today were this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommand() {
        let cli = Cli::try_parse_from(["innkeeper", "parse", "inquiry.txt", "--today", "2024-12-01"]).unwrap();
        match cli.command {
            Commands::Parse { file, today } => {
                assert_eq!(file, Some(PathBuf::from("inquiry.txt")));
                assert_eq!(today, NaiveDate::from_ymd_opt(2024, 12, 1));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_process_subcommand() {
        let cli = Cli::try_parse_from(["innkeeper", "process", "--config", "/etc/innkeeper.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Process { config: Some(_) }));
        assert!(Cli::try_parse_from(["innkeeper", "parse", "--today", "tomorrow"]).is_err());
    }
}
