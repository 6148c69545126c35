mod ticket_client;

pub use self::ticket_client::*;
