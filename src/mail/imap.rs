//! IMAP mailbox over implicit TLS

use super::{decode_message, MailSource, RawEmail};
use crate::config::MailboxConfig;
use crate::error::MailError;
use async_trait::async_trait;
use log::{debug, info, warn};
use secrecy::{ExposeSecret, SecretString};

type Session = imap::Session<native_tls::TlsStream<std::net::TcpStream>>;

/// Unseen messages from one folder; fetching them flags them `\Seen`
pub struct ImapSource {
    host: String,
    port: u16,
    folder: String,
    user: String,
    password: SecretString,
}

impl ImapSource {
    pub fn new(config: &MailboxConfig, user: String, password: SecretString) -> Self {
        Self {
            host: config.imap_host.clone(),
            port: config.imap_port,
            folder: config.folder.clone(),
            user,
            password,
        }
    }
}

#[async_trait]
impl MailSource for ImapSource {
    async fn fetch_unseen(&mut self) -> Result<Vec<RawEmail>, MailError> {
        let host = self.host.clone();
        let port = self.port;
        let folder = self.folder.clone();
        let user = self.user.clone();
        let password = self.password.expose_secret().to_string();

        tokio::task::spawn_blocking(move || {
            let mut session = connect_and_login(&host, port, &user, &password)?;
            let result = fetch_folder(&mut session, &folder);
            session.logout().ok();
            result
        })
        .await
        .map_err(|e| MailError::Connection(format!("IMAP task failed: {e}")))?
    }
}

fn connect_and_login(host: &str, port: u16, user: &str, password: &str) -> Result<Session, MailError> {
    let tls = native_tls::TlsConnector::builder()
        .build()
        .map_err(|e| MailError::Connection(format!("TLS connector build failed: {e}")))?;

    let client = imap::connect((host, port), host, &tls)
        .map_err(|e| MailError::Connection(format!("IMAP connection to {host} failed: {e}")))?;

    let session = client
        .login(user, password)
        .map_err(|e| MailError::Authentication(e.0.to_string()))?;
    info!("Logged in to {} as {}", host, user);
    Ok(session)
}

fn fetch_folder(session: &mut Session, folder: &str) -> Result<Vec<RawEmail>, MailError> {
    session
        .select(folder)
        .map_err(|e| MailError::Connection(format!("IMAP SELECT {folder} failed: {e}")))?;

    let mut uids: Vec<u32> = session
        .uid_search("UNSEEN")
        .map_err(|e| MailError::Connection(format!("IMAP UID SEARCH failed: {e}")))?
        .into_iter()
        .collect();
    if uids.is_empty() {
        debug!("No unseen messages in {}", folder);
        return Ok(Vec::new());
    }
    uids.sort_unstable();

    let uid_set = uids.iter().map(u32::to_string).collect::<Vec<_>>().join(",");
    let fetches = session
        .uid_fetch(&uid_set, "RFC822")
        .map_err(|e| MailError::Connection(format!("IMAP UID FETCH failed: {e}")))?;

    let mut emails = Vec::new();
    for fetch in fetches.iter() {
        let uid = fetch.uid.unwrap_or(0).to_string();
        let Some(body) = fetch.body() else {
            warn!("Message {} has no body", uid);
            continue;
        };
        match decode_message(&uid, body) {
            Ok(email) => emails.push(email),
            Err(err) => {
                warn!("Could not decode message {}, passing it on for manual review: {}", uid, err);
                emails.push(RawEmail::undecodable(&uid, body, &err));
            }
        }
    }

    session
        .uid_store(&uid_set, "+FLAGS (\\Seen)")
        .map_err(|e| MailError::Connection(format!("IMAP UID STORE failed: {e}")))?;

    info!("Fetched {} unseen message(s) from {}", emails.len(), folder);
    Ok(emails)
}
