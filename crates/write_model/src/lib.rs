mod write_model;

pub use self::write_model::*;
