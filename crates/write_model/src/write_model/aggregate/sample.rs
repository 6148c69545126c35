use crate::value_object::{DateTime, EventId, SeatCount};

/// One observation of an event's ticket counts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sample {
    available: SeatCount,
    event_id: EventId,
    observed_at: DateTime,
    sold: SeatCount,
}

impl Sample {
    pub fn new(
        event_id: EventId,
        observed_at: DateTime,
        sold: SeatCount,
        available: SeatCount,
    ) -> Self {
        Self {
            available,
            event_id,
            observed_at,
            sold,
        }
    }

    pub fn available(&self) -> SeatCount {
        self.available
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    pub fn observed_at(&self) -> DateTime {
        self.observed_at
    }

    pub fn sold(&self) -> SeatCount {
        self.sold
    }
}
