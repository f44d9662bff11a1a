//! Persistence layer: a durable key-value slot and the workout blob on top of it.

pub mod kv;
pub mod workouts;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use workouts::WorkoutStore;
