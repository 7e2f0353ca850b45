use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the config file location
pub const CONFIG_PATH_VAR: &str = "INNKEEPER_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub mailbox: MailboxConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailSourceKind {
    #[default]
    Spool,
    Imap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailboxConfig {
    pub source: MailSourceKind,
    pub imap_host: String,
    pub imap_port: u16,
    pub folder: String,
    pub spool_dir: PathBuf,
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            source: MailSourceKind::Spool,
            imap_host: "imap.gmail.com".to_string(),
            imap_port: 993,
            folder: "INBOX".to_string(),
            spool_dir: PathBuf::from("spool"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub from_name: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self { host: "smtp.gmail.com".to_string(), port: 465, from_name: "Reservations".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub base_url: String,
    pub source_id: String,
    pub currencies: Vec<String>,
    pub rooms: u32,
    pub timeout_secs: u64,
    pub free_cancellation_days: i64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://reserve-online.net/".to_string(),
            source_id: "107".to_string(),
            currencies: vec!["EUR".to_string(), "USD".to_string()],
            rooms: 1,
            timeout_secs: 60,
            free_cancellation_days: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StandardizerKind {
    #[default]
    None,
    OpenAI,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub standardizer: StandardizerKind,
    pub model: String,
    pub api_url: String,
    pub cache_size: usize,
    pub timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            standardizer: StandardizerKind::None,
            model: "gpt-4o-mini".to_string(),
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            cache_size: 100,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recipient {
    #[default]
    Staff,
    Customer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NotifyConfig {
    pub recipient: Recipient,
}

impl Config {
    /// Load from an explicit path, `INNKEEPER_CONFIG_PATH`, or the platform
    /// config directory. A missing file is created with defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => get_config_path()?,
        };

        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content).context("Failed to write config file")?;

        Ok(())
    }
}

fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_VAR) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let proj_dirs = ProjectDirs::from("gr", "innkeeper", "innkeeper")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.mailbox.source, MailSourceKind::Spool);
        assert_eq!(config.mailbox.imap_port, 993);
        assert_eq!(config.smtp.port, 465);
        assert_eq!(config.booking.source_id, "107");
        assert_eq!(config.booking.currencies, vec!["EUR", "USD"]);
        assert_eq!(config.extraction.standardizer, StandardizerKind::None);
        assert_eq!(config.notify.recipient, Recipient::Staff);
    }

    #[test]
    fn test_config_save_load() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        // First load writes the defaults
        let created = Config::load(Some(&config_path))?;
        assert!(config_path.exists());

        let mut config = created.clone();
        config.booking.rooms = 2;
        config.notify.recipient = Recipient::Customer;
        config.save_to(&config_path)?;

        let loaded = Config::load(Some(&config_path))?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[mailbox]\nsource = \"imap\"\n\n[extraction]\nstandardizer = \"openai\"\n")?;

        let config = Config::load(Some(&config_path))?;
        assert_eq!(config.mailbox.source, MailSourceKind::Imap);
        assert_eq!(config.mailbox.folder, "INBOX");
        assert_eq!(config.extraction.standardizer, StandardizerKind::OpenAI);
        assert_eq!(config.booking, BookingConfig::default());

        Ok(())
    }
}
