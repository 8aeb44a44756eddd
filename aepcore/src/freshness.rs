use serde::{Deserialize, Serialize};

/// The metadata key under which the freshness timestamp is stored.
pub const META_KEY: &str = "aep_password_reset";

/// 60 (seconds) * 60 (minutes) * 24 (hours) * 90 (days)
pub const VALIDITY_WINDOW: i64 = 7_776_000;

/// When an account's password was last known to have been set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct FreshnessRecord {
    pub user_id: i64,
    pub last_reset_at: i64,
}

/// The state of a freshness record relative to some instant.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FreshnessStatus {
    NoRecord,
    Fresh {
        last_reset_at: i64,
        expires_at: i64,
    },
    Expired {
        last_reset_at: i64,
        expires_at: i64,
    },
}

pub mod traits;
mod impls;
