use std::cmp::Ordering;

use write_model::{
    value_object::{date_time, DateTime, SeatCount},
    History,
};

use super::Settings;

const MINUTE_MILLIS: i64 = 60 * 1_000;

/// Tickets sold within the trailing windows before the generation instant.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Velocity {
    pub day: u32,
    pub hour: u32,
    pub ten_minutes: u32,
}

impl Velocity {
    pub fn new(history: &History, now: DateTime) -> Self {
        Self {
            day: sold_within(history, now, 24 * 60),
            hour: sold_within(history, now, 60),
            ten_minutes: sold_within(history, now, 10),
        }
    }
}

impl std::fmt::Display for Velocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = vec![];
        if self.day > 0 {
            parts.push(format!("{} tickets in last day", self.day));
        }
        if self.hour > 0 {
            parts.push(format!("{} in last hour", self.hour));
        }
        if self.ten_minutes > 0 {
            parts.push(format!("{} in last 10min", self.ten_minutes));
        }
        f.write_str(&parts.join(" | "))
    }
}

// max minus min of the samples observed at or after `now - minutes`
fn sold_within(history: &History, now: DateTime, minutes: i64) -> u32 {
    let since = now.to_unix_timestamp_millis() - minutes * MINUTE_MILLIS;
    let sold = history
        .samples()
        .iter()
        .filter(|sample| sample.observed_at().to_unix_timestamp_millis() >= since)
        .map(|sample| u32::from(sample.sold()))
        .collect::<Vec<u32>>();
    if sold.len() < 2 {
        return 0;
    }
    match (sold.iter().min(), sold.iter().max()) {
        (Some(min), Some(max)) => max - min,
        _ => 0,
    }
}

/// `floor((sold + reserved seats) * 100 / capacity)`
pub fn capacity_percent(sold: SeatCount, settings: &Settings) -> u64 {
    (u64::from(u32::from(sold)) + u64::from(settings.reserved_seats)) * 100
        / u64::from(settings.capacity.get())
}

/// 1 July of the season `now` falls into.
pub fn season_start(now: DateTime) -> Result<DateTime, date_time::Error> {
    let year = if now.month() < 7 {
        now.year() - 1
    } else {
        now.year()
    };
    DateTime::start_of_month(year, 7)
}

fn latest_sold(history: &History) -> SeatCount {
    history
        .latest()
        .map(|sample| sample.sold())
        .unwrap_or_default()
}

fn max_sold(history: &History) -> SeatCount {
    history
        .samples()
        .iter()
        .map(|sample| sample.sold())
        .max()
        .unwrap_or_default()
}

fn by_kick_off(a: &History, b: &History) -> Ordering {
    a.event()
        .starts_at()
        .cmp(&b.event().starts_at())
        .then_with(|| a.event().id().cmp(b.event().id()))
}

#[derive(Debug)]
pub struct Upcoming<'a> {
    pub available: SeatCount,
    pub capacity_percent: u64,
    pub history: &'a History,
    pub sold: SeatCount,
    pub velocity: Velocity,
}

/// Events kicking off at or after `now`, soonest first.
pub fn upcoming<'a>(
    histories: &'a [History],
    now: DateTime,
    settings: &Settings,
) -> Vec<Upcoming<'a>> {
    let mut selected = histories
        .iter()
        .filter(|history| history.event().starts_at() >= now)
        .collect::<Vec<&History>>();
    selected.sort_by(|a, b| by_kick_off(a, b));
    selected
        .into_iter()
        .map(|history| {
            let (sold, available) = history
                .latest()
                .map(|sample| (sample.sold(), sample.available()))
                .unwrap_or_default();
            Upcoming {
                available,
                capacity_percent: capacity_percent(sold, settings),
                history,
                sold,
                velocity: Velocity::new(history, now),
            }
        })
        .collect()
}

#[derive(Debug)]
pub struct SeasonEntry<'a> {
    pub history: &'a History,
    pub rank: usize,
    pub sold: SeatCount,
}

impl<'a> SeasonEntry<'a> {
    pub fn is_top(&self) -> bool {
        self.rank <= 3
    }
}

/// Past matches of the current season, newest first, ranked by tickets sold.
#[derive(Debug)]
pub struct Season<'a> {
    pub entries: Vec<SeasonEntry<'a>>,
}

impl<'a> Season<'a> {
    pub fn new(histories: &'a [History], now: DateTime, start: DateTime) -> Self {
        let mut ranked = histories
            .iter()
            .filter(|history| {
                let starts_at = history.event().starts_at();
                starts_at >= start && starts_at < now
            })
            .map(|history| (history, latest_sold(history)))
            .collect::<Vec<(&History, SeatCount)>>();
        ranked.sort_by(|(a, a_sold), (b, b_sold)| {
            b_sold.cmp(a_sold).then_with(|| by_kick_off(a, b))
        });
        let mut entries = ranked
            .into_iter()
            .enumerate()
            .map(|(index, (history, sold))| SeasonEntry {
                history,
                rank: index + 1,
                sold,
            })
            .collect::<Vec<SeasonEntry>>();
        entries.sort_by(|a, b| by_kick_off(b.history, a.history));
        Self { entries }
    }

    pub fn summary(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let count = self.entries.len() as u64;
        let total = self
            .entries
            .iter()
            .map(|entry| u64::from(u32::from(entry.sold)))
            .sum::<u64>();
        Some(format!(
            "{} matches this season, average {} tickets sold",
            count,
            total / count
        ))
    }
}

/// Events drawn in the overview chart, ordered by kick-off: the best selling
/// event ever recorded, the most recent past event and every upcoming one.
pub fn overview_selection(histories: &[History], now: DateTime) -> Vec<&History> {
    let best_selling = histories.iter().max_by(|a, b| {
        max_sold(a)
            .cmp(&max_sold(b))
            .then_with(|| by_kick_off(b, a))
    });
    let most_recent_past = histories
        .iter()
        .filter(|history| history.event().starts_at() < now)
        .max_by(|a, b| by_kick_off(a, b));
    let mut selected = best_selling
        .into_iter()
        .chain(most_recent_past)
        .chain(
            histories
                .iter()
                .filter(|history| history.event().starts_at() >= now),
        )
        .collect::<Vec<&History>>();
    selected.sort_by(|a, b| by_kick_off(a, b));
    selected.dedup_by(|a, b| a.event().id() == b.event().id());
    selected
}
