use std::sync::Arc;

use write_model::{
    aggregate::{Event, Sample},
    value_object::EventId,
};

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] Box<dyn std::error::Error + Send + Sync>);

/// Read side of the history store.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait HistoryReader {
    /// Every known event, ordered by kick-off then id.
    async fn events(&self) -> Result<Vec<Event>, Error>;
    /// Samples of one event, oldest first. Empty for an unknown event.
    async fn history(&self, event_id: EventId) -> Result<Vec<Sample>, Error>;
}

pub trait HasHistoryReader {
    fn history_reader(&self) -> Arc<dyn HistoryReader + Send + Sync>;
}
