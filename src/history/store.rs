use async_trait::async_trait;
use axum::http::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::HttpError;
use crate::impl_into_response;

/// Upper bound on stored past searches
pub const MAX_HISTORY: usize = 5;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to persist search history: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode search history: {0}")]
    Encode(#[from] serde_json::Error),
}

impl HttpError for HistoryError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "HISTORY_IO_ERROR",
            Self::Encode(_) => "HISTORY_ENCODE_ERROR",
        }
    }
}

impl_into_response!(HistoryError);

/// Store for the bounded recent-search list: at most [`MAX_HISTORY`] entries,
/// unique (case-sensitive), most-recently-searched first.
#[async_trait]
pub trait SearchHistoryStore: Send + Sync {
    /// Read the persisted history. Absent or malformed storage yields an
    /// empty list rather than an error.
    async fn load(&self) -> Vec<String>;

    /// Prepend `name`, dropping any prior occurrence of the same string and
    /// truncating to [`MAX_HISTORY`], then persist. Callers re-`load()` to
    /// observe the update.
    async fn record(&self, name: &str) -> Result<(), HistoryError>;
}

/// History persisted as a JSON array of strings in a single file.
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SearchHistoryStore for FileHistoryStore {
    async fn load(&self) -> Vec<String> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read search history");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(history) => history,
            Err(e) => {
                // Malformed storage is treated as empty history
                tracing::warn!(path = %self.path.display(), error = %e, "Malformed search history, starting fresh");
                Vec::new()
            }
        }
    }

    async fn record(&self, name: &str) -> Result<(), HistoryError> {
        let previous = self.load().await;

        let updated = prepend_deduped(name, previous);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let encoded = serde_json::to_string(&updated)?;
        tokio::fs::write(&self.path, encoded).await?;

        tracing::debug!(name = %name, entries = updated.len(), "Search history updated");
        Ok(())
    }
}

/// Pure history update: prepend, drop prior case-sensitive duplicate, truncate
fn prepend_deduped(name: &str, previous: Vec<String>) -> Vec<String> {
    let mut updated = Vec::with_capacity(MAX_HISTORY);
    updated.push(name.to_string());
    updated.extend(previous.into_iter().filter(|c| c != name));
    updated.truncate(MAX_HISTORY);
    updated
}
