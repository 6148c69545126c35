use std::sync::Arc;

use write_model::Snapshot;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] Box<dyn std::error::Error + Send + Sync>);

/// Append side of the history store.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait HistoryWriter {
    /// Appends one sample per snapshot entry and returns how many were new.
    ///
    /// Samples whose (event, timestamp) pair is already stored are skipped.
    async fn record(&self, snapshot: &Snapshot) -> Result<usize, Error>;
}

pub trait HasHistoryWriter {
    fn history_writer(&self) -> Arc<dyn HistoryWriter + Send + Sync>;
}
