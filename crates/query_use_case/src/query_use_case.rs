pub mod load_history;
pub mod port;
