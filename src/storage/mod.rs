use serde::{Deserialize, Serialize};
use tracing::warn;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Read and decode a JSON value. Missing or corrupt entries read as `None`.
pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = local_storage()?;
    let json = storage.get_item(key).ok().flatten()?;
    match serde_json::from_str(&json) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable storage entry");
            None
        }
    }
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    let Ok(json) = serde_json::to_string(value) else {
        return;
    };
    if let Some(storage) = local_storage() {
        if storage.set_item(key, &json).is_err() {
            warn!(key, "localStorage write rejected");
        }
    }
}

pub(crate) fn remove_from_storage(key: &str) {
    if let Some(storage) = local_storage() {
        if storage.remove_item(key).is_err() {
            warn!(key, "localStorage remove rejected");
        }
    }
}
