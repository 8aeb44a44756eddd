use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    error::Error,
    policy::CredentialResult,
};

/// Priority at which the freshness policy filters authentication; this is
/// late so that it only ever sees the outcome of credential verification.
pub const AUTHENTICATE_PRIORITY: i32 = 30;

/// The default priority for filters that do not specify one.
pub const DEFAULT_PRIORITY: i32 = 10;

/// The password related portion of a profile update as submitted.
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdate {
    /// Whether the identity provider attached a validation error to the
    /// password field.
    pub password_field_error: bool,
    pub pass1: String,
    pub pass2: String,
}

/// A step in the authentication pipeline.  Each filter receives the result
/// produced by the previous one.
#[async_trait]
pub trait AuthenticateFilter: Send + Sync {
    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    async fn filter(
        &self,
        credential: CredentialResult,
    ) -> Result<CredentialResult, Error>;
}

/// Authentication filters ordered by ascending priority; filters with the
/// same priority run in the order they were added.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn AuthenticateFilter>>,
}

mod impls;
