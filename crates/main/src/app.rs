use std::sync::Arc;

use command_use_case::port::{HistoryWriter, SnapshotSource};
use query_use_case::port::HistoryReader;

#[derive(Clone)]
pub struct App {
    history_reader: Arc<dyn HistoryReader + Send + Sync>,
    history_writer: Arc<dyn HistoryWriter + Send + Sync>,
    snapshot_source: Arc<dyn SnapshotSource + Send + Sync>,
}

impl App {
    pub fn new(
        history_reader: Arc<dyn HistoryReader + Send + Sync>,
        history_writer: Arc<dyn HistoryWriter + Send + Sync>,
        snapshot_source: Arc<dyn SnapshotSource + Send + Sync>,
    ) -> Self {
        Self {
            history_reader,
            history_writer,
            snapshot_source,
        }
    }
}

impl command_use_case::port::HasHistoryWriter for App {
    fn history_writer(&self) -> Arc<dyn HistoryWriter + Send + Sync> {
        self.history_writer.clone()
    }
}

impl command_use_case::port::HasSnapshotSource for App {
    fn snapshot_source(&self) -> Arc<dyn SnapshotSource + Send + Sync> {
        self.snapshot_source.clone()
    }
}

impl command_use_case::record_snapshot::HasRecordSnapshot for App {
    fn record_snapshot(
        &self,
    ) -> Arc<dyn command_use_case::record_snapshot::RecordSnapshot + Send + Sync> {
        Arc::new(self.clone())
    }
}

impl command_use_case::record_snapshot::RecordSnapshot for App {}

impl query_use_case::load_history::HasLoadHistory for App {
    fn load_history(&self) -> Arc<dyn query_use_case::load_history::LoadHistory + Send + Sync> {
        Arc::new(self.clone())
    }
}

impl query_use_case::load_history::LoadHistory for App {}

impl query_use_case::port::HasHistoryReader for App {
    fn history_reader(&self) -> Arc<dyn HistoryReader + Send + Sync> {
        self.history_reader.clone()
    }
}
