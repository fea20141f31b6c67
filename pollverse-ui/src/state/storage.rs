//! Browser key-value store over `window.localStorage`

use pollverse::storage::{KeyValueStore, StoreError, StoreResult};

pub struct LocalStore;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let storage = local_storage()
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))?;

        storage.set_item(key, value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}
