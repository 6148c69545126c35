use crate::value_object::{DateTime, EventId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid title")]
    InvalidTitle,
}

/// A ticketed match.
///
/// Stored the first time it shows up in a snapshot and never changed
/// afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Event {
    id: EventId,
    sale_ends_at: DateTime,
    sale_starts_at: DateTime,
    starts_at: DateTime,
    title: String,
}

impl Event {
    pub fn new(
        id: EventId,
        title: String,
        starts_at: DateTime,
        sale_starts_at: DateTime,
        sale_ends_at: DateTime,
    ) -> Result<Self, Error> {
        if title.trim().is_empty() {
            return Err(Error::InvalidTitle);
        }
        Ok(Self {
            id,
            sale_ends_at,
            sale_starts_at,
            starts_at,
            title,
        })
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    /// The away side for titles of the form `"Home : Away"`, the full title
    /// otherwise.
    pub fn opponent(&self) -> &str {
        match self.title.split_once(" : ") {
            Some((_, away)) => away,
            None => &self.title,
        }
    }

    pub fn sale_ends_at(&self) -> DateTime {
        self.sale_ends_at
    }

    pub fn sale_starts_at(&self) -> DateTime {
        self.sale_starts_at
    }

    pub fn starts_at(&self) -> DateTime {
        self.starts_at
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    fn build(title: &str) -> Result<Event, Error> {
        Event::new(
            EventId::from_str("e1").expect("valid id"),
            title.to_owned(),
            DateTime::from_str("2024-08-03T17:00:00Z").expect("valid date"),
            DateTime::from_str("2024-07-01T08:00:00Z").expect("valid date"),
            DateTime::from_str("2024-08-03T16:00:00Z").expect("valid date"),
        )
    }

    #[test]
    fn test_new() -> anyhow::Result<()> {
        let event = build("GAK 1902 : Sturm Graz")?;
        assert_eq!(event.id().as_str(), "e1");
        assert_eq!(event.title(), "GAK 1902 : Sturm Graz");
        assert_eq!(event.starts_at().to_string(), "2024-08-03T17:00:00.000Z");
        assert_eq!(
            event.sale_starts_at().to_string(),
            "2024-07-01T08:00:00.000Z"
        );
        assert_eq!(event.sale_ends_at().to_string(), "2024-08-03T16:00:00.000Z");
        assert!(matches!(build(""), Err(Error::InvalidTitle)));
        assert!(matches!(build("  "), Err(Error::InvalidTitle)));
        Ok(())
    }

    #[test]
    fn test_opponent() -> anyhow::Result<()> {
        assert_eq!(build("GAK 1902 : Sturm Graz")?.opponent(), "Sturm Graz");
        assert_eq!(build("A : B : C")?.opponent(), "B : C");
        assert_eq!(build("Friendly")?.opponent(), "Friendly");
        Ok(())
    }
}
