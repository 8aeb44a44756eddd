use serde::{Deserialize, Serialize};

use super::Account;

/// The successful outcome of credential verification as reported by the
/// identity provider.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum Principal {
    /// A fully resolved account.
    Account(Account),
    /// Anything else the provider may produce (e.g. an application token
    /// that is not backed by an account record); opaque to this crate.
    Unresolved(String),
}

impl Principal {
    pub fn account(&self) -> Option<&Account> {
        match self {
            Principal::Account(account) => Some(account),
            Principal::Unresolved(_) => None,
        }
    }
}

impl From<Account> for Principal {
    fn from(account: Account) -> Self {
        Principal::Account(account)
    }
}
