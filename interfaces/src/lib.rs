pub mod defs;
pub mod state;

pub use defs::{NotificationHost, NotificationLink, NotificationPayload, Storage};
pub use state::{MemoryStorage, SqliteStorage};
