use async_trait::async_trait;
use mockall::mock;
use aepcore::{
    ac::traits::{
        MetaBackend,
        PrivilegeBackend,
    },
    error::BackendError,
    platform::{
        DefaultFPPlatform,
        PlatformUrl,
    },
};

mock! {
    pub Platform {}

    #[async_trait]
    impl MetaBackend for Platform {
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

    #[async_trait]
    impl PrivilegeBackend for Platform {
        async fn is_super_admin(
            &self,
            user_id: i64,
        ) -> Result<bool, BackendError>;
    }

    impl PlatformUrl for Platform {
        fn url(&self) -> &str;
    }
}

impl DefaultFPPlatform for MockPlatform {}
