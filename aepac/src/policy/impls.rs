use aepcore::{
    ac::{
        account::{
            Account,
            ADMINISTRATOR,
        },
        traits::PrivilegeBackend,
    },
    clock::{
        Clock,
        UtcClock,
    },
    freshness::{
        FreshnessRecord,
        FreshnessStatus,
        traits::FreshnessBackend,
    },
    platform::FPPlatform,
};
use std::{
    collections::BTreeSet,
    sync::Arc,
};

use crate::error::{
    Error,
    PasswordExpired,
};

use super::*;

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn platform(mut self, val: impl FPPlatform + 'static) -> Self {
        self.platform = Some(Arc::new(val));
        self
    }

    pub fn boxed_platform(mut self, val: Arc<dyn FPPlatform>) -> Self {
        self.platform = Some(val);
        self
    }

    pub fn clock(mut self, val: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(val));
        self
    }

    pub fn validity_window(mut self, val: i64) -> Self {
        self.validity_window = Some(val);
        self
    }

    pub fn privileged_role(mut self, val: impl Into<String>) -> Self {
        self.privileged_roles.insert(val.into());
        self
    }

    pub fn reset_url(mut self, val: impl Into<String>) -> Self {
        self.reset_url = Some(val.into());
        self
    }

    pub fn build(self) -> Result<Policy, Error> {
        let platform = self.platform
            .ok_or_else(|| Error::Misconfiguration(
                "missing required argument platform".to_string()
            ))?;
        let validity_window = self.validity_window.unwrap_or(VALIDITY_WINDOW);
        if validity_window <= 0 {
            return Err(Error::Misconfiguration(format!(
                "validity window must be positive, got {validity_window}"
            )));
        }
        let privileged_roles = if self.privileged_roles.is_empty() {
            BTreeSet::from([ADMINISTRATOR.to_string()])
        } else {
            self.privileged_roles
        };
        Ok(Policy(Arc::new(PolicyInner {
            platform,
            clock: self.clock
                .unwrap_or_else(|| Arc::new(UtcClock) as Arc<dyn Clock>),
            validity_window,
            privileged_roles,
            reset_url: self.reset_url
                .unwrap_or_else(|| DEFAULT_RESET_URL.to_string()),
        })))
    }
}

impl Policy {
    pub(crate) fn platform(&self) -> &dyn FPPlatform {
        self.0.platform.as_ref()
    }

    pub fn now(&self) -> i64 {
        self.0.clock.now()
    }

    pub fn validity_window(&self) -> i64 {
        self.0.validity_window
    }

    pub fn reset_url(&self) -> &str {
        self.0.reset_url.as_ref()
    }
}

// Privilege determination

impl Policy {
    /// An account is privileged if it holds any of the privileged roles,
    /// or if the platform reports it as a super-admin.
    pub async fn is_privileged(
        &self,
        account: &Account,
    ) -> Result<bool, Error> {
        if account.has_any_role(
            self.0.privileged_roles.iter().map(String::as_str)
        ) {
            return Ok(true);
        }
        Ok(self.platform().is_super_admin(account.id).await?)
    }
}

// Freshness record management

impl Policy {
    /// Record that the password for the account was changed at the
    /// provided timestamp, or now if none was provided.  Returns the
    /// timestamp that was written.
    pub async fn record_password_changed(
        &self,
        account_id: i64,
        at: Option<i64>,
    ) -> Result<i64, Error> {
        let ts = match at {
            Some(at) if at < 0 => return Err(Error::InvalidTimestamp(at)),
            Some(at) => at,
            None => self.now(),
        };
        self.platform()
            .set_freshness_record(&FreshnessRecord::new(account_id, ts))
            .await?;
        log::info!("recorded password change for account {account_id} at {ts}");
        Ok(ts)
    }

    pub async fn get_freshness_record(
        &self,
        account_id: i64,
    ) -> Result<Option<FreshnessRecord>, Error> {
        Ok(self.platform().get_freshness_record(account_id).await?)
    }

    /// Report the freshness of the account's password as of now; this
    /// never writes a record.
    pub async fn freshness_status(
        &self,
        account_id: i64,
    ) -> Result<FreshnessStatus, Error> {
        let record = self.get_freshness_record(account_id).await?;
        Ok(FreshnessStatus::new(
            record.as_ref(),
            self.now(),
            self.0.validity_window,
        ))
    }
}

// Login evaluation

impl Policy {
    /// Evaluate the outcome of credential verification against the policy.
    ///
    /// Failures and anything that isn't a resolved account pass through
    /// untouched, as do accounts that are not privileged.  A privileged
    /// account without a record has its record started now.  A privileged
    /// account whose password was last set at least the validity window
    /// ago is rejected with `AuthenticationError::PasswordExpired`.
    ///
    /// The outer `Err` denotes a fault in looking up or recording the
    /// freshness record, which must not be treated as either outcome.
    pub async fn evaluate_login(
        &self,
        credential: CredentialResult,
    ) -> Result<CredentialResult, Error> {
        let expired = match &credential {
            Ok(principal) => match principal.account() {
                Some(account) => self.check_account(account).await?,
                None => None,
            },
            Err(_) => None,
        };
        Ok(match expired {
            Some(expired) => Err(expired.into()),
            None => credential,
        })
    }

    async fn check_account(
        &self,
        account: &Account,
    ) -> Result<Option<PasswordExpired>, Error> {
        if !self.is_privileged(account).await? {
            return Ok(None);
        }
        let now = self.now();
        let record = match self.get_freshness_record(account.id).await? {
            Some(record) => record,
            None => {
                log::debug!(
                    "no password freshness record for account {}; starting one at {now}",
                    account.id,
                );
                self.platform()
                    .set_freshness_record(&FreshnessRecord::new(account.id, now))
                    .await?;
                return Ok(None);
            }
        };
        if record.is_expired(now, self.0.validity_window) {
            log::info!(
                "rejecting login for account {}: password last reset at {}",
                account.id,
                record.last_reset_at,
            );
            Ok(Some(PasswordExpired::new(self.reset_url())))
        } else {
            Ok(None)
        }
    }
}
