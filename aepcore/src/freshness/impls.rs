use std::fmt;
use crate::error::ValueError;
use super::{
    FreshnessRecord,
    FreshnessStatus,
    META_KEY,
};

impl FreshnessRecord {
    pub fn new(user_id: i64, last_reset_at: i64) -> Self {
        Self {
            user_id,
            last_reset_at,
        }
    }

    /// Parse the stored metadata value; only non-negative integers are
    /// valid timestamps.
    pub fn from_meta(user_id: i64, value: &str) -> Result<Self, ValueError> {
        value.trim()
            .parse::<i64>()
            .ok()
            .filter(|ts| *ts >= 0)
            .map(|last_reset_at| Self::new(user_id, last_reset_at))
            .ok_or_else(|| ValueError::Malformed {
                key: META_KEY.to_string(),
                value: value.to_string(),
            })
    }

    pub fn to_meta(&self) -> String {
        self.last_reset_at.to_string()
    }

    pub fn elapsed(&self, now: i64) -> i64 {
        now - self.last_reset_at
    }

    pub fn expires_at(&self, window: i64) -> i64 {
        self.last_reset_at.saturating_add(window)
    }

    pub fn is_expired(&self, now: i64, window: i64) -> bool {
        self.elapsed(now) >= window
    }
}

impl FreshnessStatus {
    pub fn new(
        record: Option<&FreshnessRecord>,
        now: i64,
        window: i64,
    ) -> Self {
        match record {
            None => FreshnessStatus::NoRecord,
            Some(record) => {
                let last_reset_at = record.last_reset_at;
                let expires_at = record.expires_at(window);
                if record.is_expired(now, window) {
                    FreshnessStatus::Expired { last_reset_at, expires_at }
                } else {
                    FreshnessStatus::Fresh { last_reset_at, expires_at }
                }
            }
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, FreshnessStatus::Expired { .. })
    }
}

impl fmt::Display for FreshnessStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FreshnessStatus::NoRecord => write!(f, "no record"),
            FreshnessStatus::Fresh { last_reset_at, expires_at } => write!(
                f,
                "fresh (last reset at {last_reset_at}, expires at {expires_at})",
            ),
            FreshnessStatus::Expired { last_reset_at, expires_at } => write!(
                f,
                "expired (last reset at {last_reset_at}, expired at {expires_at})",
            ),
        }
    }
}
