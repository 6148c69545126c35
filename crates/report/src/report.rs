mod chart;
mod html;
pub mod summary;

use std::{
    num::NonZeroU32,
    path::{Path, PathBuf},
};

use write_model::{
    value_object::{date_time, DateTime},
    History,
};

pub const DEFAULT_CAPACITY: NonZeroU32 = match NonZeroU32::new(15_000) {
    Some(capacity) => capacity,
    None => unreachable!(),
};
pub const DEFAULT_RESERVED_SEATS: u32 = 2_333 + 285 + 296;

const CHARTS_DIR: &str = "charts";
const INDEX_FILE: &str = "index.html";
const OVERVIEW_CHART_FILE: &str = "overview.svg";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("create dir {}", .0.display())]
    CreateDir(PathBuf, #[source] std::io::Error),
    #[error("empty history (event id = {0})")]
    EmptyHistory(String),
    #[error("rename {}", .0.display())]
    Rename(PathBuf, #[source] std::io::Error),
    #[error("season start")]
    SeasonStart(#[source] date_time::Error),
    #[error("write {}", .0.display())]
    Write(PathBuf, #[source] std::io::Error),
}

/// Stadium figures used for the utilisation column.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    pub capacity: NonZeroU32,
    /// Seats held outside online sale, counted as sold.
    pub reserved_seats: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            reserved_seats: DEFAULT_RESERVED_SEATS,
        }
    }
}

pub struct Renderer {
    settings: Settings,
}

impl Renderer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Writes one chart per event, the overview chart and `index.html` into
    /// `out_dir`.
    ///
    /// Output depends only on the arguments. Every history is checked before
    /// anything is written, and `index.html` is replaced last, in one rename.
    pub fn render(
        &self,
        histories: &[History],
        generated_at: DateTime,
        out_dir: &Path,
    ) -> Result<(), Error> {
        if let Some(history) = histories.iter().find(|history| history.is_empty()) {
            return Err(Error::EmptyHistory(history.event().id().to_string()));
        }
        create_dir(out_dir)?;

        if histories.is_empty() {
            tracing::warn!("no events recorded");
            return write_index(out_dir, &html::EmptyPage { generated_at }.to_string());
        }

        let season_start = summary::season_start(generated_at).map_err(Error::SeasonStart)?;
        let charts_dir = out_dir.join(CHARTS_DIR);
        create_dir(&charts_dir)?;
        for history in histories {
            write_file(
                &charts_dir.join(format!("{}.svg", history.event().id())),
                &chart::event_chart(history).to_string(),
            )?;
        }
        let overview = summary::overview_selection(histories, generated_at);
        write_file(
            &charts_dir.join(OVERVIEW_CHART_FILE),
            &chart::overview_chart(&overview).to_string(),
        )?;
        tracing::info!(
            charts = histories.len(),
            overview = overview.len(),
            dir = %charts_dir.display(),
            "charts written"
        );

        let upcoming = summary::upcoming(histories, generated_at, &self.settings);
        let season = summary::Season::new(histories, generated_at, season_start);
        let page = html::Page {
            generated_at,
            season: &season,
            upcoming: &upcoming,
        };
        write_index(out_dir, &page.to_string())
    }

    /// Replaces `index.html` with a page reporting `message`. Charts are left
    /// untouched.
    pub fn render_error(
        &self,
        message: &str,
        last_successful_run: Option<DateTime>,
        generated_at: DateTime,
        out_dir: &Path,
    ) -> Result<(), Error> {
        create_dir(out_dir)?;
        let page = html::ErrorPage {
            generated_at,
            last_successful_run,
            message,
        };
        write_index(out_dir, &page.to_string())
    }
}

fn create_dir(dir: &Path) -> Result<(), Error> {
    std::fs::create_dir_all(dir).map_err(|e| Error::CreateDir(dir.to_path_buf(), e))
}

fn write_file(path: &Path, contents: &str) -> Result<(), Error> {
    std::fs::write(path, contents).map_err(|e| Error::Write(path.to_path_buf(), e))
}

fn write_index(out_dir: &Path, contents: &str) -> Result<(), Error> {
    let path = out_dir.join(INDEX_FILE);
    let tmp = out_dir.join(format!(".{}.tmp", INDEX_FILE));
    write_file(&tmp, contents)?;
    std::fs::rename(&tmp, &path).map_err(|e| Error::Rename(path.clone(), e))?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}
