use async_trait::async_trait;
use crate::error::BackendError;
use super::account::Account;

/// Generic per-account key/value metadata storage.
#[async_trait]
pub trait MetaBackend {
    async fn get_user_meta(
        &self,
        user_id: i64,
        key: &str,
    ) -> Result<Option<String>, BackendError>;
    async fn set_user_meta(
        &self,
        user_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), BackendError>;
}

/// Provider-wide privilege queries that are not expressed as roles.
#[async_trait]
pub trait PrivilegeBackend {
    async fn is_super_admin(
        &self,
        user_id: i64,
    ) -> Result<bool, BackendError>;
}

/// Account management, as provided by a reference identity provider.
#[async_trait]
pub trait AccountBackend {
    async fn add_account(
        &self,
        name: &str,
    ) -> Result<i64, BackendError>;
    async fn get_account_by_id(
        &self,
        id: i64,
    ) -> Result<Option<Account>, BackendError>;
    async fn get_account_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Account>, BackendError>;
    async fn grant_role_to_account(
        &self,
        account_id: i64,
        role: &str,
    ) -> Result<bool, BackendError>;
    async fn revoke_role_from_account(
        &self,
        account_id: i64,
        role: &str,
    ) -> Result<bool, BackendError>;
    async fn set_super_admin(
        &self,
        account_id: i64,
        flag: bool,
    ) -> Result<bool, BackendError>;
}
