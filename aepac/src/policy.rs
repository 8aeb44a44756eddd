use aepcore::{
    ac::Principal,
    clock::Clock,
    platform::FPPlatform,
};
use std::{
    collections::BTreeSet,
    sync::Arc,
};

use crate::error::AuthenticationError;

pub use aepcore::freshness::VALIDITY_WINDOW;

/// The outcome of credential verification, as threaded through the
/// authentication filters.
pub type CredentialResult = Result<Principal, AuthenticationError>;

pub const DEFAULT_RESET_URL: &str = "/login?action=lostpassword";

#[derive(Default)]
pub struct Builder {
    // platform
    platform: Option<Arc<dyn FPPlatform>>,
    clock: Option<Arc<dyn Clock>>,
    validity_window: Option<i64>,
    // roles that make an account privileged, in addition to super-admins
    privileged_roles: BTreeSet<String>,
    reset_url: Option<String>,
}

/// The password freshness policy.
///
/// Privileged accounts must have recorded a password change within the
/// validity window, otherwise their otherwise successful logins are turned
/// into `AuthenticationError::PasswordExpired`.
#[derive(Clone)]
pub struct Policy(Arc<PolicyInner>);

struct PolicyInner {
    platform: Arc<dyn FPPlatform>,
    clock: Arc<dyn Clock>,
    validity_window: i64,
    privileged_roles: BTreeSet<String>,
    reset_url: String,
}

mod impls;
