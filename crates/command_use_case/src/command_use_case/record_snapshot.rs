use std::sync::Arc;

use crate::port::{
    history_writer, snapshot_source, HasHistoryWriter, HasSnapshotSource, HistoryWriter,
    SnapshotSource,
};

#[derive(Debug)]
pub struct Input;

#[derive(Debug, Eq, PartialEq)]
pub struct Output {
    pub events: usize,
    pub recorded: usize,
    pub taken_at: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("history record")]
    HistoryRecord(#[source] history_writer::Error),
    #[error("snapshot fetch")]
    SnapshotFetch(#[source] snapshot_source::Error),
}

#[async_trait::async_trait]
pub trait RecordSnapshot: HasHistoryWriter + HasSnapshotSource {
    #[tracing::instrument(level = tracing::Level::INFO, err(Debug), ret, skip(self))]
    async fn execute(&self, _input: Input) -> Result<Output, Error> {
        let snapshot_source = self.snapshot_source();
        let history_writer = self.history_writer();

        let snapshot = snapshot_source
            .fetch()
            .await
            .map_err(Error::SnapshotFetch)?;
        if snapshot.is_empty() {
            tracing::warn!("no events listed");
        }

        let recorded = history_writer
            .record(&snapshot)
            .await
            .map_err(Error::HistoryRecord)?;

        Ok(Output {
            events: snapshot.entries().len(),
            recorded,
            taken_at: snapshot.taken_at().to_string(),
        })
    }
}

#[cfg(any(test, feature = "test-util"))]
mockall::mock! {
    pub RecordSnapshot {}

    impl HasHistoryWriter for RecordSnapshot {
        fn history_writer(&self) -> Arc<dyn HistoryWriter + Send + Sync>;
    }

    impl HasSnapshotSource for RecordSnapshot {
        fn snapshot_source(&self) -> Arc<dyn SnapshotSource + Send + Sync>;
    }

    #[async_trait::async_trait]
    impl RecordSnapshot for RecordSnapshot {
        async fn execute(&self, input: Input) -> Result<Output, Error>;
    }
}

pub trait HasRecordSnapshot {
    fn record_snapshot(&self) -> Arc<dyn RecordSnapshot + Send + Sync>;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use write_model::{
        aggregate::Event,
        value_object::{DateTime, EventId, SeatCount},
        Snapshot, SnapshotEntry,
    };

    use crate::port::{history_writer::MockHistoryWriter, snapshot_source::MockSnapshotSource};

    use super::*;

    #[test]
    fn test_mock() {
        let mut mock = MockRecordSnapshot::new();
        mock.expect_execute().return_once(|_| {
            Ok(Output {
                events: 1,
                recorded: 1,
                taken_at: "2024-08-01T10:00:00.000Z".to_string(),
            })
        });
    }

    #[tokio::test]
    async fn test_execute() -> anyhow::Result<()> {
        let snapshot = build_snapshot()?;
        let mut snapshot_source = MockSnapshotSource::new();
        snapshot_source
            .expect_fetch()
            .return_once(move || Ok(snapshot));
        let mut history_writer = MockHistoryWriter::new();
        history_writer
            .expect_record()
            .withf(|snapshot| snapshot.entries().len() == 2)
            .return_once(|_| Ok(2));
        let app = TestApp {
            history_writer: Arc::new(history_writer),
            snapshot_source: Arc::new(snapshot_source),
        };
        assert_eq!(
            app.execute(Input).await?,
            Output {
                events: 2,
                recorded: 2,
                taken_at: "2024-08-01T10:00:00.000Z".to_string(),
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_execute_fetch_error() -> anyhow::Result<()> {
        let mut snapshot_source = MockSnapshotSource::new();
        snapshot_source
            .expect_fetch()
            .return_once(|| Err(snapshot_source::Error::from(build_error())));
        let mut history_writer = MockHistoryWriter::new();
        history_writer.expect_record().never();
        let app = TestApp {
            history_writer: Arc::new(history_writer),
            snapshot_source: Arc::new(snapshot_source),
        };
        assert!(matches!(
            app.execute(Input).await,
            Err(Error::SnapshotFetch(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_execute_record_error() -> anyhow::Result<()> {
        let snapshot = build_snapshot()?;
        let mut snapshot_source = MockSnapshotSource::new();
        snapshot_source
            .expect_fetch()
            .return_once(move || Ok(snapshot));
        let mut history_writer = MockHistoryWriter::new();
        history_writer
            .expect_record()
            .return_once(|_| Err(history_writer::Error::from(build_error())));
        let app = TestApp {
            history_writer: Arc::new(history_writer),
            snapshot_source: Arc::new(snapshot_source),
        };
        assert!(matches!(
            app.execute(Input).await,
            Err(Error::HistoryRecord(_))
        ));
        Ok(())
    }

    struct TestApp {
        history_writer: Arc<MockHistoryWriter>,
        snapshot_source: Arc<MockSnapshotSource>,
    }

    impl HasHistoryWriter for TestApp {
        fn history_writer(&self) -> Arc<dyn HistoryWriter + Send + Sync> {
            self.history_writer.clone()
        }
    }

    impl HasSnapshotSource for TestApp {
        fn snapshot_source(&self) -> Arc<dyn SnapshotSource + Send + Sync> {
            self.snapshot_source.clone()
        }
    }

    impl RecordSnapshot for TestApp {}

    fn build_snapshot() -> anyhow::Result<Snapshot> {
        let entry = |id: &str, sold: u32| -> anyhow::Result<SnapshotEntry> {
            Ok(SnapshotEntry {
                available: SeatCount::from(100 - sold),
                event: Event::new(
                    EventId::from_str(id)?,
                    format!("GAK 1902 : {id}"),
                    DateTime::from_str("2024-08-03T17:00:00Z")?,
                    DateTime::from_str("2024-07-01T08:00:00Z")?,
                    DateTime::from_str("2024-08-03T16:00:00Z")?,
                )?,
                sold: SeatCount::from(sold),
            })
        };
        Ok(Snapshot::new(
            DateTime::from_str("2024-08-01T10:00:00Z")?,
            vec![entry("a", 10)?, entry("b", 5)?],
        )?)
    }

    fn build_error() -> Box<dyn std::error::Error + Send + Sync> {
        Box::new(std::io::Error::new(std::io::ErrorKind::Other, "error"))
    }
}
