//! Infrastructure adapters for the Crew client.

pub mod flag_store;

pub use flag_store::FileFlagStore;
