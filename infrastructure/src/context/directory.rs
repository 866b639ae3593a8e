//! Directory-backed context provider
//!
//! Reads `<dir>/<scope>.md` for each department, falling back to
//! `<dir>/common.md`. Scope names are lower-cased and any character other
//! than ASCII alphanumerics, `-` or `_` becomes `_`, so `"R&D"` reads
//! `r_d.md`.

use async_trait::async_trait;
use council_application::{ContextError, ContextProvider};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const COMMON_FILE: &str = "common.md";

#[derive(Debug, Clone)]
pub struct DirectoryContextProvider {
    root: PathBuf,
}

impl DirectoryContextProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scope_path(&self, scope: &str) -> PathBuf {
        let file: String = scope
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.md", file))
    }

    /// `Ok(None)` when the file does not exist
    async fn read(path: &Path) -> Result<Option<String>, ContextError> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ContextError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl ContextProvider for DirectoryContextProvider {
    async fn lookup(&self, _query: &str, scope: &str) -> Result<String, ContextError> {
        let scoped = self.scope_path(scope);
        if let Some(text) = Self::read(&scoped).await? {
            debug!("Context for {} from {}", scope, scoped.display());
            return Ok(text);
        }

        let common = self.root.join(COMMON_FILE);
        if let Some(text) = Self::read(&common).await? {
            debug!("Context for {} from {}", scope, common.display());
            return Ok(text);
        }

        warn!(
            "No context for {} in {}, drafting without it",
            scope,
            self.root.display()
        );
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_scope_file_preferred() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("finance.md"), "Burn is $50k/month").unwrap();
        fs::write(dir.path().join("common.md"), "Shared facts").unwrap();

        let provider = DirectoryContextProvider::new(dir.path());
        let text = provider.lookup("Pause AWS?", "Finance").await.unwrap();
        assert_eq!(text, "Burn is $50k/month");
    }

    #[tokio::test]
    async fn test_falls_back_to_common() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("common.md"), "Shared facts").unwrap();

        let provider = DirectoryContextProvider::new(dir.path());
        let text = provider.lookup("Pause AWS?", "Growth").await.unwrap();
        assert_eq!(text, "Shared facts");
    }

    #[tokio::test]
    async fn test_empty_when_nothing_found() {
        let dir = TempDir::new().unwrap();
        let provider = DirectoryContextProvider::new(dir.path());
        let text = provider.lookup("Pause AWS?", "Tech").await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_scope_names_are_sanitized() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("r_d.md"), "Lab notes").unwrap();

        let provider = DirectoryContextProvider::new(dir.path());
        assert_eq!(provider.lookup("q", "R&D").await.unwrap(), "Lab notes");
        assert_eq!(
            provider.scope_path("../secrets"),
            dir.path().join("___secrets.md")
        );
    }

    #[tokio::test]
    async fn test_unreadable_scope_is_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be cannot be read as text
        fs::create_dir(dir.path().join("tech.md")).unwrap();

        let provider = DirectoryContextProvider::new(dir.path());
        let err = provider.lookup("q", "Tech").await.unwrap_err();
        assert!(matches!(err, ContextError::Io { .. }));
    }
}
