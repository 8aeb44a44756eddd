use async_trait::async_trait;
use crate::{
    ac::traits::MetaBackend,
    error::{
        BackendError,
        ValueError,
    },
};
use super::{
    FreshnessRecord,
    META_KEY,
};

/// Typed access to the freshness record on top of the generic metadata
/// storage; provided for every `MetaBackend`.
#[async_trait]
pub trait FreshnessBackend {
    async fn get_freshness_record(
        &self,
        user_id: i64,
    ) -> Result<Option<FreshnessRecord>, ValueError>;
    async fn set_freshness_record(
        &self,
        record: &FreshnessRecord,
    ) -> Result<(), BackendError>;
}

#[async_trait]
impl<T> FreshnessBackend for T
where
    T: MetaBackend + Send + Sync + ?Sized,
{
    async fn get_freshness_record(
        &self,
        user_id: i64,
    ) -> Result<Option<FreshnessRecord>, ValueError> {
        self.get_user_meta(user_id, META_KEY)
            .await?
            .map(|value| FreshnessRecord::from_meta(user_id, &value))
            .transpose()
    }

    async fn set_freshness_record(
        &self,
        record: &FreshnessRecord,
    ) -> Result<(), BackendError> {
        self.set_user_meta(
            record.user_id,
            META_KEY,
            &record.to_meta(),
        ).await
    }
}
