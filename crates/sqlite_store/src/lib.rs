mod sqlite_store;

pub use self::sqlite_store::*;
