pub mod compare;
pub mod dispatch;
pub mod dupes;
pub mod fix;
pub mod schema;
