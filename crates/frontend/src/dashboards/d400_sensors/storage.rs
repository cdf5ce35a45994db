use contracts::dashboards::d400_sensors::CounterStore;
use web_sys::{window, Storage};

/// Usage counters kept in the browser's local storage.
pub struct LocalStorageCounterStore {
    storage: Storage,
}

impl LocalStorageCounterStore {
    pub fn open() -> Option<Self> {
        let storage = window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl CounterStore for LocalStorageCounterStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            log::warn!("failed to persist {}: {:?}", key, e);
        }
    }
}
