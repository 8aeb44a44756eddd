use std::sync::Arc;

/// Source of the current time, in seconds since the unix epoch.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// The wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct UtcClock;

impl Clock for UtcClock {
    fn now(&self) -> i64 {
        crate::chrono::Utc::now().timestamp()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> i64 {
        self.as_ref().now()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use test_aep::chrono::set_timestamp;
    use super::{
        Clock,
        UtcClock,
    };

    #[test]
    fn utc_clock() {
        set_timestamp(1234567890);
        assert_eq!(UtcClock.now(), 1234567890);
        set_timestamp(7776000);
        assert_eq!(UtcClock.now(), 7776000);
        let clock: Arc<dyn Clock> = Arc::new(UtcClock);
        assert_eq!(clock.now(), 7776000);
    }
}
