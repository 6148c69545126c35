use std::sync::Arc;

use write_model::History;

use crate::port::{history_reader, HasHistoryReader, HistoryReader};

#[derive(Debug)]
pub struct Input;

pub struct Output(pub Vec<History>);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("event list")]
    EventList(#[source] history_reader::Error),
    #[error("history get (event id = {0})")]
    HistoryGet(String, #[source] history_reader::Error),
}

#[async_trait::async_trait]
pub trait LoadHistory: HasHistoryReader {
    #[tracing::instrument(level = tracing::Level::INFO, err(Debug), skip(self))]
    async fn execute(&self, _input: Input) -> Result<Output, Error> {
        let history_reader = self.history_reader();
        let events = history_reader.events().await.map_err(Error::EventList)?;
        let mut histories = Vec::with_capacity(events.len());
        for event in events {
            let samples = history_reader
                .history(event.id().clone())
                .await
                .map_err(|e| Error::HistoryGet(event.id().to_string(), e))?;
            histories.push(History::new(event, samples));
        }
        tracing::info!(events = histories.len(), "history loaded");
        Ok(Output(histories))
    }
}

#[cfg(any(test, feature = "test-util"))]
mockall::mock! {
    pub LoadHistory {}

    impl HasHistoryReader for LoadHistory {
        fn history_reader(&self) -> Arc<dyn HistoryReader + Send + Sync>;
    }

    #[async_trait::async_trait]
    impl LoadHistory for LoadHistory {
        async fn execute(&self, input: Input) -> Result<Output, Error>;
    }
}

pub trait HasLoadHistory {
    fn load_history(&self) -> Arc<dyn LoadHistory + Send + Sync>;
}
