use aepcore::{
    ac::traits::MetaBackend,
    error::BackendError,
};
use async_trait::async_trait;

use crate::SqliteBackend;

async fn get_user_meta_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
    key: &str,
) -> Result<Option<String>, BackendError> {
    let value = sqlx::query_scalar::<_, String>(
        r#"
SELECT
    value
FROM
    account_meta
WHERE
    account_id = ?1 AND
    key = ?2
        "#,
    )
    .bind(user_id)
    .bind(key)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(value)
}

async fn set_user_meta_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
    key: &str,
    value: &str,
) -> Result<(), BackendError> {
    sqlx::query(
        r#"
INSERT INTO account_meta (
    account_id,
    key,
    value
)
VALUES ( ?1, ?2, ?3 )
ON CONFLICT (account_id, key)
DO UPDATE SET
    value = excluded.value
        "#,
    )
    .bind(user_id)
    .bind(key)
    .bind(value)
    .execute(&*backend.pool)
    .await?;
    log::trace!("account {user_id} meta {key:?} set to {value:?}");
    Ok(())
}

#[async_trait]
impl MetaBackend for SqliteBackend {
    async fn get_user_meta(
        &self,
        user_id: i64,
        key: &str,
    ) -> Result<Option<String>, BackendError> {
        get_user_meta_sqlite(
            &self,
            user_id,
            key,
        ).await
    }

    async fn set_user_meta(
        &self,
        user_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), BackendError> {
        set_user_meta_sqlite(
            &self,
            user_id,
            key,
            value,
        ).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use aepcore::{
        ac::traits::MetaBackend,
        freshness::{
            FreshnessRecord,
            META_KEY,
            traits::FreshnessBackend,
        },
    };
    use crate::SqliteBackend;

    #[async_std::test]
    async fn test_basic() -> anyhow::Result<()> {
        let backend = SqliteBackend::fp("sqlite::memory:".into()).await?;
        assert_eq!(MetaBackend::get_user_meta(&backend, 1, "key").await?, None);

        MetaBackend::set_user_meta(&backend, 1, "key", "value1").await?;
        MetaBackend::set_user_meta(&backend, 2, "key", "other").await?;
        assert_eq!(
            MetaBackend::get_user_meta(&backend, 1, "key").await?.as_deref(),
            Some("value1"),
        );
        MetaBackend::set_user_meta(&backend, 1, "key", "value2").await?;
        assert_eq!(
            MetaBackend::get_user_meta(&backend, 1, "key").await?.as_deref(),
            Some("value2"),
        );
        assert_eq!(
            MetaBackend::get_user_meta(&backend, 2, "key").await?.as_deref(),
            Some("other"),
        );
        assert_eq!(MetaBackend::get_user_meta(&backend, 1, "other").await?, None);
        Ok(())
    }

    #[async_std::test]
    async fn test_freshness_record() -> anyhow::Result<()> {
        let backend = SqliteBackend::fp("sqlite::memory:".into()).await?;
        assert_eq!(backend.get_freshness_record(1).await?, None);
        backend.set_freshness_record(&FreshnessRecord::new(1, 0)).await?;
        assert_eq!(
            backend.get_freshness_record(1).await?,
            Some(FreshnessRecord::new(1, 0)),
        );
        assert_eq!(
            MetaBackend::get_user_meta(&backend, 1, META_KEY).await?.as_deref(),
            Some("0"),
        );
        backend.set_freshness_record(&FreshnessRecord::new(1, 7776000)).await?;
        assert_eq!(
            backend.get_freshness_record(1).await?,
            Some(FreshnessRecord::new(1, 7776000)),
        );
        Ok(())
    }
}
