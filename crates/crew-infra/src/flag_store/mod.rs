//! Persistent flag store adapters

pub mod file;

pub use file::{FileFlagStore, DEFAULT_FLAG_FILE};
