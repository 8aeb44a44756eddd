use std::{
    collections::BTreeSet,
    fmt,
};
use super::Account;

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Account:{}:{}", self.id, self.name)
    }
}

impl Account {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            roles: BTreeSet::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Returns true if any of the provided roles is held by this account.
    pub fn has_any_role<'a>(
        &self,
        mut roles: impl Iterator<Item = &'a str>,
    ) -> bool {
        roles.any(|role| self.has_role(role))
    }
}
