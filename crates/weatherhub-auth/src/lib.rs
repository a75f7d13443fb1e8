//! Session state for WeatherHub: the bearer credential and the display-only
//! identity marker, kept in a durable key-value store.

pub mod session;
pub mod storage;

pub use session::Session;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
