use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    error::Error,
    policy::{
        CredentialResult,
        Policy,
    },
};
use super::*;

impl ProfileUpdate {
    pub fn new(
        password_field_error: bool,
        pass1: impl Into<String>,
        pass2: impl Into<String>,
    ) -> Self {
        Self {
            password_field_error,
            pass1: pass1.into(),
            pass2: pass2.into(),
        }
    }

    /// Only an update without errors on the password field that provided
    /// both the new password and its confirmation changed the password.
    pub fn password_changed(&self) -> bool {
        !self.password_field_error
            && !self.pass1.is_empty()
            && !self.pass2.is_empty()
    }
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, filter: impl AuthenticateFilter + 'static) -> Self {
        self.push(Arc::new(filter));
        self
    }

    pub fn push(&mut self, filter: Arc<dyn AuthenticateFilter>) {
        let priority = filter.priority();
        let idx = self.filters
            .partition_point(|f| f.priority() <= priority);
        self.filters.insert(idx, filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Thread the credential through every filter; a fault aborts the
    /// chain.
    pub async fn run(
        &self,
        credential: CredentialResult,
    ) -> Result<CredentialResult, Error> {
        let mut credential = credential;
        for filter in self.filters.iter() {
            credential = filter.filter(credential).await?;
        }
        Ok(credential)
    }
}

// Event handlers for the identity provider.

impl Policy {
    /// Handle the profile update event; the password change is recorded
    /// only if the update actually changed the password.
    pub async fn on_profile_update(
        &self,
        account_id: i64,
        update: &ProfileUpdate,
    ) -> Result<Option<i64>, Error> {
        if !update.password_changed() {
            log::trace!("profile update for account {account_id} did not change password");
            return Ok(None);
        }
        Ok(Some(self.record_password_changed(account_id, None).await?))
    }

    /// Handle the completion of the password reset flow.
    pub async fn on_password_reset(
        &self,
        account_id: i64,
    ) -> Result<i64, Error> {
        self.record_password_changed(account_id, None).await
    }
}

#[async_trait]
impl AuthenticateFilter for Policy {
    fn priority(&self) -> i32 {
        AUTHENTICATE_PRIORITY
    }

    async fn filter(
        &self,
        credential: CredentialResult,
    ) -> Result<CredentialResult, Error> {
        self.evaluate_login(credential).await
    }
}

#[cfg(test)]
mod test {
    use aepcore::{
        ac::{
            account::{
                Account,
                ADMINISTRATOR,
            },
            Principal,
        },
        freshness::{
            META_KEY,
            VALIDITY_WINDOW,
        },
    };
    use mockall::predicate::*;
    use test_aep::{
        clock::MockClock,
        core::MockPlatform,
    };
    use crate::{
        error::{
            AuthenticationError,
            PasswordExpired,
        },
        policy::Builder,
    };
    use super::*;

    // Stands in for the provider's own credential verification.
    struct Verify(Option<Account>);

    #[async_trait]
    impl AuthenticateFilter for Verify {
        fn priority(&self) -> i32 {
            20
        }

        async fn filter(
            &self,
            credential: CredentialResult,
        ) -> Result<CredentialResult, Error> {
            Ok(match (&self.0, credential) {
                (_, Ok(principal)) => Ok(principal),
                (Some(account), Err(_)) => Ok(account.clone().into()),
                (None, Err(_)) => Err(AuthenticationError::InvalidCredentials),
            })
        }
    }

    fn new_policy(platform: MockPlatform, clock: &MockClock) -> Policy {
        Builder::new()
            .platform(platform)
            .clock(clock.clone())
            .build()
            .expect("valid policy")
    }

    fn admin() -> Account {
        Account::new(1, "admin").with_role(ADMINISTRATOR)
    }

    #[async_std::test]
    async fn profile_update_records() -> anyhow::Result<()> {
        let clock = MockClock::new(1000);
        let mut platform = MockPlatform::new();
        platform.expect_set_user_meta()
            .with(eq(1), eq(META_KEY), eq("1000"))
            .times(1)
            .returning(|_, _, _| Ok(()));
        let policy = new_policy(platform, &clock);

        assert_eq!(
            policy.on_profile_update(1, &ProfileUpdate::new(true, "a", "a")).await?,
            None,
        );
        assert_eq!(
            policy.on_profile_update(1, &ProfileUpdate::new(false, "", "")).await?,
            None,
        );
        assert_eq!(
            policy.on_profile_update(1, &ProfileUpdate::new(false, "a", "a")).await?,
            Some(1000),
        );
        Ok(())
    }

    #[async_std::test]
    async fn password_reset_records() -> anyhow::Result<()> {
        let clock = MockClock::new(VALIDITY_WINDOW);
        let mut platform = MockPlatform::new();
        platform.expect_set_user_meta()
            .with(eq(1), eq(META_KEY), eq("7776000"))
            .times(1)
            .returning(|_, _, _| Ok(()));
        let policy = new_policy(platform, &clock);
        assert_eq!(policy.on_password_reset(1).await?, VALIDITY_WINDOW);
        Ok(())
    }

    #[async_std::test]
    async fn chain_runs_policy_after_verification() -> anyhow::Result<()> {
        let clock = MockClock::new(VALIDITY_WINDOW);
        let mut platform = MockPlatform::new();
        platform.expect_get_user_meta()
            .with(eq(1), eq(META_KEY))
            .times(1)
            .returning(|_, _| Ok(Some("0".to_string())));
        platform.expect_set_user_meta().never();
        let policy = new_policy(platform, &clock);

        // added out of order on purpose
        let chain = FilterChain::new()
            .add(policy.clone())
            .add(Verify(Some(admin())));
        assert_eq!(chain.len(), 2);
        assert_eq!(
            chain.run(Err(AuthenticationError::UnknownUser)).await?,
            Err(AuthenticationError::PasswordExpired(
                PasswordExpired::new(policy.reset_url())
            )),
        );
        Ok(())
    }

    #[async_std::test]
    async fn chain_keeps_verification_failure() -> anyhow::Result<()> {
        let clock = MockClock::new(VALIDITY_WINDOW * 2);
        let mut platform = MockPlatform::new();
        platform.expect_is_super_admin().never();
        platform.expect_get_user_meta().never();
        platform.expect_set_user_meta().never();
        let policy = new_policy(platform, &clock);

        let chain = FilterChain::new()
            .add(Verify(None))
            .add(policy);
        assert_eq!(
            chain.run(Err(AuthenticationError::UnknownUser)).await?,
            Err(AuthenticationError::InvalidCredentials),
        );
        assert!(FilterChain::new().is_empty());
        assert_eq!(
            FilterChain::new().run(Ok(Principal::Unresolved("x".into()))).await?,
            Ok(Principal::Unresolved("x".into())),
        );
        Ok(())
    }

    #[test]
    fn profile_update_gate() {
        assert!(ProfileUpdate::new(false, "hunter2", "hunter2").password_changed());
        // the confirmation matching is the provider's concern
        assert!(ProfileUpdate::new(false, "hunter2", "hunter3").password_changed());
        assert!(!ProfileUpdate::new(true, "hunter2", "hunter2").password_changed());
        assert!(!ProfileUpdate::new(false, "", "hunter2").password_changed());
        assert!(!ProfileUpdate::new(false, "hunter2", "").password_changed());
        assert!(!ProfileUpdate::default().password_changed());
    }
}
