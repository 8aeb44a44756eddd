use aepcore::{
    ac::traits::PrivilegeBackend,
    error::BackendError,
};
use async_trait::async_trait;

use crate::SqliteBackend;

async fn is_super_admin_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
) -> Result<bool, BackendError> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
SELECT
    COUNT(*)
FROM
    account_super_admin
WHERE
    account_id = ?1
        "#,
    )
    .bind(user_id)
    .fetch_one(&*backend.pool)
    .await?;
    Ok(count > 0)
}

#[async_trait]
impl PrivilegeBackend for SqliteBackend {
    async fn is_super_admin(
        &self,
        user_id: i64,
    ) -> Result<bool, BackendError> {
        is_super_admin_sqlite(
            &self,
            user_id,
        ).await
    }
}
