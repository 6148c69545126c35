mod sqlite_history_store;

pub use self::sqlite_history_store::{Error, SqliteHistoryStore};
