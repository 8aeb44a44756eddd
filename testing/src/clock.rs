use aepcore::clock::Clock;
use std::sync::{
    atomic::{
        AtomicI64,
        Ordering,
    },
    Arc,
};

/// A clock that only moves when told to; clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct MockClock(Arc<AtomicI64>);

impl MockClock {
    pub fn new(ts: i64) -> Self {
        Self(Arc::new(AtomicI64::new(ts)))
    }

    pub fn set(&self, ts: i64) {
        self.0.store(ts, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}
