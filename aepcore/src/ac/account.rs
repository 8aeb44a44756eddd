use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The role label granted to site administrators.
pub const ADMINISTRATOR: &str = "administrator";

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub roles: BTreeSet<String>,
}

mod impls;
