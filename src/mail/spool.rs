//! Directory spool of `.eml` files, for local runs and tests

use super::{decode_message, MailSource, RawEmail};
use crate::error::MailError;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SEEN_SUFFIX: &str = ".seen";

/// Reads `*.eml` files; answered files are renamed to `*.eml.seen`
#[derive(Debug, Clone)]
pub struct SpoolSource {
    dir: PathBuf,
}

impl SpoolSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn pending_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "eml"))
            .collect();
        files.sort();
        files
    }
}

#[async_trait]
impl MailSource for SpoolSource {
    async fn fetch_unseen(&mut self) -> Result<Vec<RawEmail>, MailError> {
        if !self.dir.is_dir() {
            return Err(MailError::Connection(format!("spool directory {} not found", self.dir.display())));
        }

        let mut emails = Vec::new();
        for path in self.pending_files() {
            let id = file_id(&path);
            let data = fs::read(&path)?;
            match decode_message(&id, &data) {
                Ok(email) => emails.push(email),
                Err(err) => {
                    warn!("Could not decode {}, passing it on for manual review: {}", path.display(), err);
                    emails.push(RawEmail::undecodable(&id, &data, &err));
                }
            }
        }
        info!("Found {} unseen message(s) in {}", emails.len(), self.dir.display());
        Ok(emails)
    }

    async fn mark_processed(&mut self, email: &RawEmail) -> Result<(), MailError> {
        let path = self.dir.join(&email.id);
        let seen = self.dir.join(format!("{}{}", email.id, SEEN_SUFFIX));
        fs::rename(&path, &seen)?;
        debug!("Marked {} as seen", path.display());
        Ok(())
    }
}

fn file_id(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MESSAGE: &str = "From: guest@example.com\r\nSubject: Room\r\n\r\nfrom 9/11 to 12/11\r\n";

    #[tokio::test]
    async fn test_fetch_and_mark() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.eml"), MESSAGE).unwrap();
        fs::write(dir.path().join("a.eml"), MESSAGE).unwrap();
        fs::write(dir.path().join("c.eml.seen"), MESSAGE).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut source = SpoolSource::new(dir.path());
        let emails = source.fetch_unseen().await.unwrap();
        assert_eq!(emails.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(), vec!["a.eml", "b.eml"]);
        assert_eq!(emails[0].sender.as_deref(), Some("guest@example.com"));

        source.mark_processed(&emails[0]).await.unwrap();
        assert!(dir.path().join("a.eml.seen").exists());
        assert_eq!(source.fetch_unseen().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_undecodable_file_is_returned_once() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("empty.eml"), "").unwrap();

        let mut source = SpoolSource::new(dir.path());
        let emails = source.fetch_unseen().await.unwrap();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].id, "empty.eml");
        assert!(emails[0].decode_error.is_some());

        source.mark_processed(&emails[0]).await.unwrap();
        assert!(source.fetch_unseen().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let mut source = SpoolSource::new("/nonexistent/innkeeper/spool");
        assert!(matches!(source.fetch_unseen().await, Err(MailError::Connection(_))));
    }
}
