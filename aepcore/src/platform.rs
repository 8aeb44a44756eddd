use crate::ac::traits::{
    MetaBackend,
    PrivilegeBackend,
};

mod connector;
pub use connector::ConnectorOption;

pub trait PlatformUrl {
    fn url(&self) -> &str;
}

/// FPPlatform - Freshness Policy Platform
///
/// The set of capabilities the identity provider must offer for the
/// password freshness policy to be enforced against its accounts.
///
/// This trait is applicable to everything that correctly implements the
/// relevant backends that compose this trait and opts in through
/// `DefaultFPPlatform`.
pub trait FPPlatform: MetaBackend
    + PrivilegeBackend

    + PlatformUrl

    + Send
    + Sync
{
    fn as_dyn(&self) -> &dyn FPPlatform;
}

pub trait DefaultFPPlatform {}

impl<P: MetaBackend
    + PrivilegeBackend

    + PlatformUrl

    + DefaultFPPlatform

    + Send
    + Sync
> FPPlatform for P {
    fn as_dyn(&self) -> &(dyn FPPlatform) {
        self
    }
}
