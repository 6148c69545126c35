pub mod event;
pub mod sample;

pub use self::event::Event;
pub use self::sample::Sample;
