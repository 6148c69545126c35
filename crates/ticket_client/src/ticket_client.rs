mod schema;

use std::{str::FromStr as _, time::Duration};

use write_model::{
    aggregate::Event,
    value_object::{DateTime, EventId, SeatCount},
    Snapshot, SnapshotEntry,
};

use self::schema::{EventData, StadiumRepresentationConfig};

pub const DEFAULT_BASE_URL: &str = "https://ticket.grazerak.at/backend/events/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const USER_AGENT: &str = "ticket-watch";

const EVENTS_PATH: &str = "futurePublishedEvents";
const SEAT_MAP_PATH: &str = "public-stadium-representation-config";

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] InnerError);

#[derive(Debug, thiserror::Error)]
enum InnerError {
    #[error("base url {0:?}")]
    BaseUrl(String),
    #[error("build http client")]
    Build(#[source] reqwest::Error),
    #[error("decode {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("event {id:?}")]
    Event {
        id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("request {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("snapshot")]
    Snapshot(#[source] write_model::snapshot::Error),
    #[error("status {status} {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Events endpoint; `futurePublishedEvents` and `{id}/...` are resolved
    /// against it.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client for the ticket shop's public event endpoints.
#[derive(Clone)]
pub struct TicketClient {
    base_url: String,
    client: reqwest::Client,
}

impl TicketClient {
    pub fn new(Config { base_url, timeout }: Config) -> Result<Self, Error> {
        let mut base_url = base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        match reqwest::Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(InnerError::BaseUrl(base_url).into()),
        }
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(InnerError::Build)?;
        Ok(Self { base_url, client })
    }

    /// Fetches the event listing and every event's seat map.
    ///
    /// The snapshot is stamped with the time the listing was requested. Any
    /// failing request fails the whole snapshot.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, Error> {
        let taken_at = DateTime::now();
        let events = self
            .get_json::<Vec<EventData>>(format!("{}{}", self.base_url, EVENTS_PATH))
            .await?;
        tracing::debug!(count = events.len(), "events listed");

        let mut entries = Vec::with_capacity(events.len());
        for event_data in events {
            let event = Self::event_from(event_data)?;
            let url = format!("{}{}/{}", self.base_url, event.id(), SEAT_MAP_PATH);
            let counts = self
                .get_json::<StadiumRepresentationConfig>(url)
                .await?
                .seat_counts();
            tracing::debug!(
                id = %event.id(),
                title = event.title(),
                sold = counts.sold,
                available = counts.available,
                "seat map counted"
            );
            entries.push(SnapshotEntry {
                available: SeatCount::from(counts.available),
                event,
                sold: SeatCount::from(counts.sold),
            });
        }

        Ok(Snapshot::new(taken_at, entries).map_err(InnerError::Snapshot)?)
    }

    fn event_from(
        EventData {
            date_time_from,
            id,
            publicly_available_from,
            publicly_available_to,
            title,
        }: EventData,
    ) -> Result<Event, Error> {
        let build = || -> Result<Event, Box<dyn std::error::Error + Send + Sync>> {
            Ok(Event::new(
                EventId::from_str(&id)?,
                title,
                DateTime::parse_lenient(&date_time_from)?,
                DateTime::parse_lenient(&publicly_available_from)?,
                DateTime::parse_lenient(&publicly_available_to)?,
            )?)
        };
        build().map_err(|source| {
            InnerError::Event {
                id: id.clone(),
                source,
            }
            .into()
        })
    }

    async fn get_json<T>(&self, url: String) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(InnerError::Request { url, source }.into()),
        };
        let status = response.status();
        if !status.is_success() {
            return Err(InnerError::Status { url, status }.into());
        }
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(source) => return Err(InnerError::Request { url, source }.into()),
        };
        serde_json::from_slice::<T>(&bytes)
            .map_err(|source| InnerError::Decode { url, source }.into())
    }
}

#[async_trait::async_trait]
impl command_use_case::port::SnapshotSource for TicketClient {
    async fn fetch(&self) -> Result<Snapshot, command_use_case::port::snapshot_source::Error> {
        self.fetch_snapshot().await.map_err(|e| {
            command_use_case::port::snapshot_source::Error::from(
                Box::new(e) as Box<dyn std::error::Error + Send + Sync>
            )
        })
    }
}
