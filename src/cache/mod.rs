// Storage module.
// Session cache for repository stats and durable storage for user preferences.

pub mod file;
pub mod paths;
pub mod store;

pub use file::FileStore;
pub use store::{CachedData, KeyValueStore, MemoryStore, read_cached, write_cached};
