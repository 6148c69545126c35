use std::collections::BTreeSet;

use crate::{
    aggregate::{Event, Sample},
    value_object::{DateTime, EventId, SeatCount},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate event (id = {0})")]
    DuplicateEvent(EventId),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SnapshotEntry {
    pub available: SeatCount,
    pub event: Event,
    pub sold: SeatCount,
}

/// Everything one fetch saw: each listed event with its current counts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    entries: Vec<SnapshotEntry>,
    taken_at: DateTime,
}

impl Snapshot {
    pub fn new(taken_at: DateTime, entries: Vec<SnapshotEntry>) -> Result<Self, Error> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.event.id()) {
                return Err(Error::DuplicateEvent(entry.event.id().clone()));
            }
        }
        Ok(Self { entries, taken_at })
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One sample per listed event, all stamped with the snapshot time.
    pub fn samples(&self) -> Vec<Sample> {
        self.entries
            .iter()
            .map(|entry| {
                Sample::new(
                    entry.event.id().clone(),
                    self.taken_at,
                    entry.sold,
                    entry.available,
                )
            })
            .collect()
    }

    pub fn taken_at(&self) -> DateTime {
        self.taken_at
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    fn entry(id: &str, sold: u32, available: u32) -> anyhow::Result<SnapshotEntry> {
        Ok(SnapshotEntry {
            available: SeatCount::from(available),
            event: Event::new(
                EventId::from_str(id)?,
                format!("title {id}"),
                DateTime::from_str("2024-08-03T17:00:00Z")?,
                DateTime::from_str("2024-07-01T08:00:00Z")?,
                DateTime::from_str("2024-08-03T16:00:00Z")?,
            )?,
            sold: SeatCount::from(sold),
        })
    }

    #[test]
    fn test_samples() -> anyhow::Result<()> {
        let taken_at = DateTime::from_str("2024-08-01T10:00:00Z")?;
        let snapshot = Snapshot::new(taken_at, vec![entry("a", 10, 90)?, entry("b", 5, 95)?])?;
        assert_eq!(snapshot.taken_at(), taken_at);
        assert!(!snapshot.is_empty());
        assert_eq!(
            snapshot.samples(),
            vec![
                Sample::new(
                    EventId::from_str("a")?,
                    taken_at,
                    SeatCount::from(10),
                    SeatCount::from(90)
                ),
                Sample::new(
                    EventId::from_str("b")?,
                    taken_at,
                    SeatCount::from(5),
                    SeatCount::from(95)
                ),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_duplicate_event() -> anyhow::Result<()> {
        let taken_at = DateTime::from_str("2024-08-01T10:00:00Z")?;
        assert!(matches!(
            Snapshot::new(taken_at, vec![entry("a", 10, 90)?, entry("a", 11, 89)?]),
            Err(Error::DuplicateEvent(_))
        ));
        assert!(Snapshot::new(taken_at, vec![])?.is_empty());
        Ok(())
    }
}
