pub mod history_writer;
pub mod snapshot_source;

pub use self::history_writer::{HasHistoryWriter, HistoryWriter};
pub use self::snapshot_source::{HasSnapshotSource, SnapshotSource};
