// Snapshot store - the latest forecast shared between fetcher and evaluator
use crate::domain::forecast::WeatherSnapshot;
use parking_lot::Mutex;
use std::sync::Arc;

/// Snapshots are exchanged whole behind an `Arc`; readers get the pointer and
/// release the lock before looking inside.
#[derive(Debug)]
pub struct SnapshotStore {
    current: Mutex<Arc<WeatherSnapshot>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(WeatherSnapshot::absent())
    }
}

impl SnapshotStore {
    pub fn new(initial: WeatherSnapshot) -> Self {
        Self {
            current: Mutex::new(Arc::new(initial)),
        }
    }

    pub fn read(&self) -> Arc<WeatherSnapshot> {
        self.current.lock().clone()
    }

    pub fn replace(&self, next: WeatherSnapshot) {
        let next = Arc::new(next);
        // previous snapshot is dropped after the guard
        let _previous = std::mem::replace(&mut *self.current.lock(), next);
    }

    #[cfg(test)]
    pub fn is_locked(&self) -> bool {
        self.current.is_locked()
    }
}
