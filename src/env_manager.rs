use anyhow::{anyhow, Result};
use log::{info, warn};
use secrecy::SecretString;
use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

pub const EMAIL_ADDRESS: &str = "EMAIL_ADDRESS";
pub const EMAIL_PASSWORD: &str = "EMAIL_PASSWORD";
pub const STAFF_EMAIL: &str = "STAFF_EMAIL";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

pub const REQUIRED_ENV_VARS: &[&str] = &[EMAIL_ADDRESS, EMAIL_PASSWORD, STAFF_EMAIL];

// Names of optional environment variables
pub const OPTIONAL_ENV_VARS: &[&str] = &[OPENAI_API_KEY, "INNKEEPER_CONFIG_PATH", "RUST_LOG"];

/// Mailbox and notification credentials
#[derive(Debug)]
pub struct Credentials {
    pub email_address: String,
    pub email_password: SecretString,
    pub staff_email: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        let missing = missing_env_vars();
        if !missing.is_empty() {
            return Err(anyhow!("Missing required environment variables: {}", missing.join(", ")));
        }
        Ok(Self {
            email_address: get_env_var(EMAIL_ADDRESS),
            email_password: SecretString::from(get_env_var(EMAIL_PASSWORD)),
            staff_email: get_env_var(STAFF_EMAIL),
        })
    }
}

/// Required variables that are unset or blank
pub fn missing_env_vars() -> Vec<&'static str> {
    REQUIRED_ENV_VARS
        .iter()
        .copied()
        .filter(|var| get_env_var(var).trim().is_empty())
        .collect()
}

pub fn check_env_vars() -> bool {
    let missing = missing_env_vars();
    for var in &missing {
        warn!("Missing required environment variable: {}", var);
    }
    missing.is_empty()
}

pub fn load_env_file() -> io::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            info!("Loaded environment from {:?}", path);
            Ok(())
        }
        Err(e) => {
            info!("No .env file found or error loading it: {}", e);
            create_env_template()
        }
    }
}

fn create_env_template() -> io::Result<()> {
    let env_path = PathBuf::from(".env");

    // Don't overwrite existing .env file
    if env_path.exists() {
        return Ok(());
    }

    let mut file = File::create(env_path)?;
    for var in REQUIRED_ENV_VARS {
        writeln!(file, "{}=", var)?;
    }
    for var in OPTIONAL_ENV_VARS {
        writeln!(file, "# {}=", var)?;
    }

    Ok(())
}

pub fn get_env_var(name: &str) -> String {
    env::var(name).unwrap_or_default()
}

/// Key for the optional language-model standardizer
pub fn openai_api_key() -> Option<SecretString> {
    let key = get_env_var(OPENAI_API_KEY);
    if key.trim().is_empty() {
        None
    } else {
        Some(SecretString::from(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_credentials_from_env() {
        env::set_var(EMAIL_ADDRESS, "desk@hotel.gr");
        env::set_var(EMAIL_PASSWORD, "hunter2");
        env::set_var(STAFF_EMAIL, "staff@hotel.gr");

        let credentials = Credentials::from_env().unwrap();
        assert_eq!(credentials.email_address, "desk@hotel.gr");
        assert_eq!(credentials.email_password.expose_secret(), "hunter2");
        assert!(!format!("{:?}", credentials).contains("hunter2"));
        assert!(check_env_vars());
    }
}
