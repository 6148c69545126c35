pub mod history_reader;

pub use self::history_reader::{HasHistoryReader, HistoryReader};
