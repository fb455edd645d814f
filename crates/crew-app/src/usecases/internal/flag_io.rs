//! Best-effort flag store access.
//!
//! Storage failures never block navigation: reads degrade to "unset" and
//! writes are logged and reported as not persisted.

use crew_core::ports::{FlagKey, FlagStorePort};
use tracing::warn;

/// Read a boolean flag, treating failures as unset.
pub async fn read_flag(store: &dyn FlagStorePort, key: FlagKey) -> bool {
    match store.get_flag(key).await {
        Ok(value) => value,
        Err(err) => {
            warn!(key = %key, error = %err, "flag read failed, assuming unset");
            false
        }
    }
}

/// Read a raw value, treating failures as absent.
pub async fn read_value(store: &dyn FlagStorePort, key: FlagKey) -> Option<String> {
    match store.get(key).await {
        Ok(value) => value,
        Err(err) => {
            warn!(key = %key, error = %err, "flag read failed, assuming absent");
            None
        }
    }
}

/// Set a boolean flag. Returns whether the write was persisted.
pub async fn write_flag(store: &dyn FlagStorePort, key: FlagKey) -> bool {
    match store.set_flag(key).await {
        Ok(()) => true,
        Err(err) => {
            warn!(key = %key, error = %err, "flag write failed");
            false
        }
    }
}

pub async fn write_value(store: &dyn FlagStorePort, key: FlagKey, value: &str) -> bool {
    match store.set(key, value).await {
        Ok(()) => true,
        Err(err) => {
            warn!(key = %key, error = %err, "flag write failed");
            false
        }
    }
}

pub async fn remove_keys(store: &dyn FlagStorePort, keys: &[FlagKey]) -> bool {
    match store.remove(keys).await {
        Ok(()) => true,
        Err(err) => {
            warn!(keys = ?keys, error = %err, "flag removal failed");
            false
        }
    }
}
