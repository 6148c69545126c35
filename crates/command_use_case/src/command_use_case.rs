pub mod port;
pub mod record_snapshot;
