pub mod aggregate;
pub mod history;
pub mod snapshot;
pub mod value_object;

pub use self::history::History;
pub use self::snapshot::{Snapshot, SnapshotEntry};
