// Location store - the coordinate the fetcher observes
use crate::domain::location::Coordinate;
use parking_lot::Mutex;

/// Single-writer (location editor), single-reader (fetcher) cell.
/// The lock is held for exactly one copy in or out.
#[derive(Debug, Default)]
pub struct LocationStore {
    current: Mutex<Coordinate>,
}

impl LocationStore {
    pub fn new(initial: Coordinate) -> Self {
        Self {
            current: Mutex::new(initial),
        }
    }

    pub fn read(&self) -> Coordinate {
        *self.current.lock()
    }

    /// `Coordinate` values are range-checked on construction, so there is nothing to reject here.
    pub fn write(&self, next: Coordinate) {
        *self.current.lock() = next;
    }

    #[cfg(test)]
    pub fn is_locked(&self) -> bool {
        self.current.is_locked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_default_location() {
        let store = LocationStore::default();
        assert_eq!(store.read(), Coordinate::new(51.10, 17.03).unwrap());
    }

    #[test]
    fn test_write_replaces_whole_pair() {
        let store = LocationStore::default();
        let next = Coordinate::new(-33.87, 151.21).unwrap();
        store.write(next);
        assert_eq!(store.read(), next);
    }

    #[test]
    fn test_concurrent_reads_never_see_mixed_pairs() {
        let a = Coordinate::new(10.0, 10.0).unwrap();
        let b = Coordinate::new(-20.0, -20.0).unwrap();
        let store = Arc::new(LocationStore::new(a));

        let writer = {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..10_000 {
                    store.write(if i % 2 == 0 { b } else { a });
                }
            })
        };

        for _ in 0..10_000 {
            let seen = store.read();
            assert!(seen == a || seen == b, "torn coordinate {:?}", seen);
        }
        writer.join().unwrap();
    }
}
