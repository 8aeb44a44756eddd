use aepcore::{
    ac::{
        account::Account,
        traits::AccountBackend,
    },
    error::BackendError,
};
use async_trait::async_trait;
use sqlx::{
    sqlite::SqliteRow,
    Row,
};
use std::collections::BTreeSet;

use crate::SqliteBackend;

async fn add_account_sqlite(
    backend: &SqliteBackend,
    name: &str,
) -> Result<i64, BackendError> {
    let id = sqlx::query(
        r#"
INSERT INTO account (
    name
)
VALUES ( ?1 )
        "#,
    )
    .bind(name)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_account_roles_sqlite(
    backend: &SqliteBackend,
    account_id: i64,
) -> Result<BTreeSet<String>, BackendError> {
    let roles = sqlx::query_scalar::<_, String>(
        r#"
SELECT
    role
FROM
    account_role
WHERE
    account_id = ?1
        "#,
    )
    .bind(account_id)
    .fetch_all(&*backend.pool)
    .await?
    .into_iter()
    .collect();
    Ok(roles)
}

async fn get_account_sqlite(
    backend: &SqliteBackend,
    query: &str,
    id: Option<i64>,
    name: Option<&str>,
) -> Result<Option<Account>, BackendError> {
    let query = sqlx::query(query);
    let query = match (id, name) {
        (Some(id), _) => query.bind(id),
        (None, Some(name)) => query.bind(name),
        (None, None) => return Err(BackendError::AppInvariantViolation(
            "account lookup requires either an id or a name".to_string()
        )),
    };
    let account = query
        .map(|row: SqliteRow| Account::new(
            row.get::<i64, _>("id"),
            row.get::<String, _>("name"),
        ))
        .fetch_optional(&*backend.pool)
        .await?;
    match account {
        Some(mut account) => {
            account.roles = get_account_roles_sqlite(backend, account.id).await?;
            Ok(Some(account))
        }
        None => Ok(None),
    }
}

async fn get_account_by_id_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<Account>, BackendError> {
    get_account_sqlite(
        backend,
        r#"
SELECT
    id,
    name
FROM
    account
WHERE
    id = ?1
        "#,
        Some(id),
        None,
    ).await
}

async fn get_account_by_name_sqlite(
    backend: &SqliteBackend,
    name: &str,
) -> Result<Option<Account>, BackendError> {
    get_account_sqlite(
        backend,
        r#"
SELECT
    id,
    name
FROM
    account
WHERE
    name = ?1
        "#,
        None,
        Some(name),
    ).await
}

async fn grant_role_to_account_sqlite(
    backend: &SqliteBackend,
    account_id: i64,
    role: &str,
) -> Result<bool, BackendError> {
    let result = sqlx::query(
        r#"
INSERT OR IGNORE INTO account_role (
    account_id,
    role
)
VALUES ( ?1, ?2 )
        "#,
    )
    .bind(account_id)
    .bind(role)
    .execute(&*backend.pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

async fn revoke_role_from_account_sqlite(
    backend: &SqliteBackend,
    account_id: i64,
    role: &str,
) -> Result<bool, BackendError> {
    let result = sqlx::query(
        r#"
DELETE FROM
    account_role
WHERE
    account_id = ?1 AND
    role = ?2
        "#,
    )
    .bind(account_id)
    .bind(role)
    .execute(&*backend.pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

async fn set_super_admin_sqlite(
    backend: &SqliteBackend,
    account_id: i64,
    flag: bool,
) -> Result<bool, BackendError> {
    let query = if flag {
        r#"
INSERT OR IGNORE INTO account_super_admin (
    account_id
)
VALUES ( ?1 )
        "#
    } else {
        r#"
DELETE FROM
    account_super_admin
WHERE
    account_id = ?1
        "#
    };
    let result = sqlx::query(query)
        .bind(account_id)
        .execute(&*backend.pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[async_trait]
impl AccountBackend for SqliteBackend {
    async fn add_account(
        &self,
        name: &str,
    ) -> Result<i64, BackendError> {
        add_account_sqlite(
            &self,
            name,
        ).await
    }

    async fn get_account_by_id(
        &self,
        id: i64,
    ) -> Result<Option<Account>, BackendError> {
        get_account_by_id_sqlite(
            &self,
            id,
        ).await
    }

    async fn get_account_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Account>, BackendError> {
        get_account_by_name_sqlite(
            &self,
            name,
        ).await
    }

    async fn grant_role_to_account(
        &self,
        account_id: i64,
        role: &str,
    ) -> Result<bool, BackendError> {
        grant_role_to_account_sqlite(
            &self,
            account_id,
            role,
        ).await
    }

    async fn revoke_role_from_account(
        &self,
        account_id: i64,
        role: &str,
    ) -> Result<bool, BackendError> {
        revoke_role_from_account_sqlite(
            &self,
            account_id,
            role,
        ).await
    }

    async fn set_super_admin(
        &self,
        account_id: i64,
        flag: bool,
    ) -> Result<bool, BackendError> {
        set_super_admin_sqlite(
            &self,
            account_id,
            flag,
        ).await
    }
}
