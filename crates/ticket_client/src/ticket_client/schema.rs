//! Response bodies of the ticket shop backend.
//!
//! Only the fields the tracker reads are modelled; everything else is
//! ignored.

/// One entry of `futurePublishedEvents`.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventData {
    pub(crate) date_time_from: String,
    pub(crate) id: String,
    pub(crate) publicly_available_from: String,
    pub(crate) publicly_available_to: String,
    pub(crate) title: String,
}

/// Body of `{id}/public-stadium-representation-config`.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StadiumRepresentationConfig {
    pub(crate) sector_representation_configurations: Vec<SectorRepresentationConfiguration>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SectorRepresentationConfiguration {
    #[serde(default)]
    pub(crate) seat_configurations: Vec<SeatConfiguration>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SeatConfiguration {
    #[serde(default)]
    pub(crate) seat_status: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SeatCounts {
    pub(crate) available: u32,
    pub(crate) sold: u32,
}

impl StadiumRepresentationConfig {
    pub(crate) fn seat_counts(&self) -> SeatCounts {
        self.sector_representation_configurations
            .iter()
            .flat_map(|sector| sector.seat_configurations.iter())
            .fold(SeatCounts::default(), |mut counts, seat| {
                match seat.seat_status.as_deref() {
                    Some("SOLD") => counts.sold += 1,
                    Some("AVAILABLE") => counts.available += 1,
                    _ => {}
                }
                counts
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_data() -> anyhow::Result<()> {
        let events = serde_json::from_str::<Vec<EventData>>(
            r#"[{
                "id": "456e9a8a-ce64-4580-b9e0-3405a810c696",
                "title": "GAK 1902 : SK Sturm Graz",
                "dateTimeFrom": "2024-08-03T17:00:00+02:00",
                "publiclyAvailableFrom": "2024-07-01T10:00:00+02:00",
                "publiclyAvailableTo": "2024-08-03T18:30:00+02:00",
                "venue": {"name": "Merkur Arena"}
            }]"#,
        )?;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "456e9a8a-ce64-4580-b9e0-3405a810c696");
        assert_eq!(events[0].title, "GAK 1902 : SK Sturm Graz");
        assert_eq!(events[0].date_time_from, "2024-08-03T17:00:00+02:00");
        assert_eq!(events[0].publicly_available_from, "2024-07-01T10:00:00+02:00");
        assert_eq!(events[0].publicly_available_to, "2024-08-03T18:30:00+02:00");

        assert!(serde_json::from_str::<Vec<EventData>>(r#"{"id": "x"}"#).is_err());
        assert!(serde_json::from_str::<Vec<EventData>>(r#"[{"id": "x"}]"#).is_err());
        Ok(())
    }

    #[test]
    fn test_seat_counts() -> anyhow::Result<()> {
        let config = serde_json::from_str::<StadiumRepresentationConfig>(
            r#"{
                "sectorRepresentationConfigurations": [
                    {
                        "sectorId": 15,
                        "seatConfigurations": [
                            {"seatStatus": "SOLD"},
                            {"seatStatus": "SOLD"},
                            {"seatStatus": "AVAILABLE"},
                            {"seatStatus": "BLOCKED"},
                            {"seatStatus": null},
                            {}
                        ]
                    },
                    {"sectorId": 16},
                    {
                        "seatConfigurations": [
                            {"seatStatus": "AVAILABLE"},
                            {"seatStatus": "RESERVED"}
                        ]
                    }
                ]
            }"#,
        )?;
        assert_eq!(
            config.seat_counts(),
            SeatCounts {
                available: 2,
                sold: 2
            }
        );
        Ok(())
    }

    #[test]
    fn test_unexpected_shape() {
        assert!(serde_json::from_str::<StadiumRepresentationConfig>("{}").is_err());
        assert!(serde_json::from_str::<StadiumRepresentationConfig>(
            r#"{"sectorRepresentationConfigurations": {}}"#
        )
        .is_err());
        assert!(serde_json::from_str::<StadiumRepresentationConfig>("[]").is_err());
    }
}
