pub mod date_time;
pub mod event_id;
pub mod seat_count;

pub use self::date_time::DateTime;
pub use self::event_id::EventId;
pub use self::seat_count::SeatCount;
