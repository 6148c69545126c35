mod app;

use std::{
    num::NonZeroU32,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use command_use_case::record_snapshot::{self, HasRecordSnapshot as _};
use query_use_case::{
    load_history::{self, HasLoadHistory as _},
    port::HistoryReader as _,
};
use report::Renderer;
use sqlite_store::SqliteHistoryStore;
use ticket_client::TicketClient;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};
use write_model::value_object::DateTime;

use self::app::App;

const DEFAULT_FILTER: &str = "ticket_watch=info,command_use_case=info,query_use_case=info,sqlite_store=info,ticket_client=info,report=info";

/// Records the current ticket sales and renders the sales report.
#[derive(clap::Parser)]
#[command(version, about)]
struct Args {
    /// SQLite file holding the sales history; created if missing
    store: PathBuf,
    /// Directory receiving index.html and charts/
    #[arg(long, env = "TICKET_WATCH_OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,
    #[arg(long, env = "TICKET_WATCH_BASE_URL", default_value = ticket_client::DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, env = "TICKET_WATCH_TIMEOUT_SECS", default_value_t = ticket_client::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
    /// Stadium capacity
    #[arg(long, env = "TICKET_WATCH_CAPACITY", default_value_t = report::DEFAULT_CAPACITY)]
    capacity: NonZeroU32,
    /// Seats held outside online sale (sponsors, VIP boxes)
    #[arg(long, env = "TICKET_WATCH_RESERVED_SEATS", default_value_t = report::DEFAULT_RESERVED_SEATS)]
    reserved_seats: u32,
    /// Render from the stored history only
    #[arg(long)]
    skip_fetch: bool,
    /// Fetch and record only
    #[arg(long)]
    skip_render: bool,
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("fetch")]
    Fetch(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("render")]
    Render(#[source] report::Error),
    #[error("storage")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<record_snapshot::Error> for Error {
    fn from(e: record_snapshot::Error) -> Self {
        match e {
            record_snapshot::Error::HistoryRecord(e) => Self::Storage(e.into()),
            record_snapshot::Error::SnapshotFetch(e) => Self::Fetch(e.into()),
        }
    }
}

impl From<load_history::Error> for Error {
    fn from(e: load_history::Error) -> Self {
        Self::Storage(e.into())
    }
}

async fn run(args: Args) -> Result<(), Error> {
    let renderer = Renderer::new(report::Settings {
        capacity: args.capacity,
        reserved_seats: args.reserved_seats,
    });
    match record_and_render(&args, &renderer).await {
        Err(e @ (Error::Fetch(_) | Error::Storage(_))) if !args.skip_render => {
            let message = std::iter::successors(Some(&e as &dyn std::error::Error), |e| e.source())
                .map(ToString::to_string)
                .collect::<Vec<String>>()
                .join(": ");
            if let Err(page_error) = renderer.render_error(
                &message,
                last_observed_at(&args.store).await,
                DateTime::now(),
                &args.output_dir,
            ) {
                tracing::warn!(error = ?page_error, "error page not written");
            }
            Err(e)
        }
        result => result,
    }
}

async fn record_and_render(args: &Args, renderer: &Renderer) -> Result<(), Error> {
    let store =
        Arc::new(SqliteHistoryStore::open(&args.store).map_err(|e| Error::Storage(e.into()))?);
    let client = TicketClient::new(ticket_client::Config {
        base_url: args.base_url.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
    })
    .map_err(|e| Error::Fetch(e.into()))?;
    let app = App::new(store.clone(), store, Arc::new(client));

    if args.skip_fetch {
        tracing::info!("fetch skipped");
    } else {
        let record_snapshot::Output {
            events, recorded, ..
        } = app.record_snapshot().execute(record_snapshot::Input).await?;
        tracing::info!(events, recorded, "snapshot recorded");
    }

    if args.skip_render {
        tracing::info!("render skipped");
    } else {
        let load_history::Output(histories) =
            app.load_history().execute(load_history::Input).await?;
        renderer
            .render(&histories, DateTime::now(), &args.output_dir)
            .map_err(Error::Render)?;
    }
    Ok(())
}

/// The newest sample in the store, if the store can be read at all.
async fn last_observed_at(store: &Path) -> Option<DateTime> {
    let store = SqliteHistoryStore::open(store).ok()?;
    let mut last = None;
    for event in store.events().await.ok()? {
        let samples = store.history(event.id().clone()).await.ok()?;
        last = last.max(samples.last().map(|sample| sample.observed_at()));
    }
    last
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .init();
    let args = <Args as clap::Parser>::parse();
    Ok(run(args).await?)
}
