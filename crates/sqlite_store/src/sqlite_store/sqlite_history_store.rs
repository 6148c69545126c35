use std::{path::Path, str::FromStr as _};

use rusqlite::{params, Connection};
use tokio::sync::Mutex;
use write_model::{
    aggregate::{Event, Sample},
    value_object::{DateTime, EventId, SeatCount},
    Snapshot,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id             TEXT    PRIMARY KEY NOT NULL,
    title          TEXT    NOT NULL,
    starts_at      INTEGER NOT NULL,
    sale_starts_at INTEGER NOT NULL,
    sale_ends_at   INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS samples (
    event_id    TEXT    NOT NULL REFERENCES events (id),
    observed_at INTEGER NOT NULL,
    sold        INTEGER NOT NULL,
    available   INTEGER NOT NULL,
    PRIMARY KEY (event_id, observed_at)
);
"#;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("create dir")]
    CreateDir(#[source] std::io::Error),
    #[error("open")]
    Open(#[source] rusqlite::Error),
    #[error("schema")]
    Schema(#[source] rusqlite::Error),
}

struct EventRow {
    id: String,
    sale_ends_at: i64,
    sale_starts_at: i64,
    starts_at: i64,
    title: String,
}

impl TryFrom<EventRow> for Event {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(
        EventRow {
            id,
            sale_ends_at,
            sale_starts_at,
            starts_at,
            title,
        }: EventRow,
    ) -> Result<Self, Self::Error> {
        Ok(Event::new(
            EventId::from_str(&id)?,
            title,
            DateTime::from_unix_timestamp_millis(starts_at)?,
            DateTime::from_unix_timestamp_millis(sale_starts_at)?,
            DateTime::from_unix_timestamp_millis(sale_ends_at)?,
        )?)
    }
}

/// History store backed by a single SQLite file.
///
/// Events are keyed by id, samples by (event id, observation time). Both
/// tables are insert-only.
pub struct SqliteHistoryStore {
    connection: Mutex<Connection>,
}

impl SqliteHistoryStore {
    pub fn open(path: &Path) -> Result<Self, Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(Error::CreateDir)?;
            }
        }
        let connection = Connection::open(path).map_err(Error::Open)?;
        Self::init(connection)
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        let connection = Connection::open_in_memory().map_err(Error::Open)?;
        Self::init(connection)
    }

    fn init(connection: Connection) -> Result<Self, Error> {
        connection.execute_batch(SCHEMA).map_err(Error::Schema)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    async fn events_impl(&self) -> Result<Vec<Event>, Box<dyn std::error::Error + Send + Sync>> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare_cached(
            "SELECT id, title, starts_at, sale_starts_at, sale_ends_at FROM events ORDER BY starts_at, id",
        )?;
        let rows = statement
            .query_map([], |row| {
                Ok(EventRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    starts_at: row.get(2)?,
                    sale_starts_at: row.get(3)?,
                    sale_ends_at: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<EventRow>>>()?;
        rows.into_iter().map(Event::try_from).collect()
    }

    async fn history_impl(
        &self,
        event_id: EventId,
    ) -> Result<Vec<Sample>, Box<dyn std::error::Error + Send + Sync>> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare_cached(
            "SELECT observed_at, sold, available FROM samples WHERE event_id = ?1 ORDER BY observed_at",
        )?;
        let rows = statement
            .query_map(params![event_id.as_str()], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<(i64, i64, i64)>>>()?;
        let mut samples = Vec::with_capacity(rows.len());
        for (observed_at, sold, available) in rows {
            samples.push(Sample::new(
                event_id.clone(),
                DateTime::from_unix_timestamp_millis(observed_at)?,
                SeatCount::try_from(sold)?,
                SeatCount::try_from(available)?,
            ));
        }
        Ok(samples)
    }

    async fn record_impl(
        &self,
        snapshot: &Snapshot,
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
        let mut connection = self.connection.lock().await;
        let transaction = connection.transaction()?;
        let mut added = 0_usize;
        {
            let mut insert_event = transaction.prepare_cached(
                "INSERT OR IGNORE INTO events (id, title, starts_at, sale_starts_at, sale_ends_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for entry in snapshot.entries() {
                let event = &entry.event;
                insert_event.execute(params![
                    event.id().as_str(),
                    event.title(),
                    event.starts_at().to_unix_timestamp_millis(),
                    event.sale_starts_at().to_unix_timestamp_millis(),
                    event.sale_ends_at().to_unix_timestamp_millis(),
                ])?;
            }
            let mut insert_sample = transaction.prepare_cached(
                "INSERT OR IGNORE INTO samples (event_id, observed_at, sold, available) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for sample in snapshot.samples() {
                added += insert_sample.execute(params![
                    sample.event_id().as_str(),
                    sample.observed_at().to_unix_timestamp_millis(),
                    i64::from(sample.sold()),
                    i64::from(sample.available()),
                ])?;
            }
        }
        transaction.commit()?;
        tracing::info!(
            added,
            skipped = snapshot.entries().len() - added,
            taken_at = %snapshot.taken_at(),
            "samples recorded"
        );
        Ok(added)
    }
}

#[async_trait::async_trait]
impl command_use_case::port::HistoryWriter for SqliteHistoryStore {
    async fn record(
        &self,
        snapshot: &Snapshot,
    ) -> Result<usize, command_use_case::port::history_writer::Error> {
        self.record_impl(snapshot)
            .await
            .map_err(command_use_case::port::history_writer::Error::from)
    }
}

#[async_trait::async_trait]
impl query_use_case::port::HistoryReader for SqliteHistoryStore {
    async fn events(&self) -> Result<Vec<Event>, query_use_case::port::history_reader::Error> {
        self.events_impl()
            .await
            .map_err(query_use_case::port::history_reader::Error::from)
    }

    async fn history(
        &self,
        event_id: EventId,
    ) -> Result<Vec<Sample>, query_use_case::port::history_reader::Error> {
        self.history_impl(event_id)
            .await
            .map_err(query_use_case::port::history_reader::Error::from)
    }
}
