use std::sync::Arc;

use write_model::Snapshot;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] Box<dyn std::error::Error + Send + Sync>);

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait SnapshotSource {
    async fn fetch(&self) -> Result<Snapshot, Error>;
}

pub trait HasSnapshotSource {
    fn snapshot_source(&self) -> Arc<dyn SnapshotSource + Send + Sync>;
}
