mod command_use_case;

pub use self::command_use_case::*;
