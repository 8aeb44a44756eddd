//! A stand-in for `chrono::Utc` with a settable, per-thread notion of now.
use std::cell::Cell;

pub use ::chrono::{
    DateTime,
    TimeZone,
};

thread_local! {
    static TIMESTAMP: Cell<i64> = const { Cell::new(1234567890) };
}

pub fn set_timestamp(ts: i64) {
    TIMESTAMP.with(|t| t.set(ts));
}

pub struct Utc;

impl Utc {
    pub fn now() -> DateTime<::chrono::Utc> {
        ::chrono::Utc
            .timestamp_opt(TIMESTAMP.with(Cell::get), 0)
            .single()
            .unwrap_or_default()
    }
}
