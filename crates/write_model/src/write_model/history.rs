use crate::aggregate::{Event, Sample};

/// An event together with every sample recorded for it, oldest first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct History {
    event: Event,
    samples: Vec<Sample>,
}

impl History {
    pub fn new(event: Event, mut samples: Vec<Sample>) -> Self {
        samples.sort_by_key(Sample::observed_at);
        Self { event, samples }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}
