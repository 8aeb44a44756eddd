use aepcore::error::{
    BackendError,
    ValueError,
};
use thiserror::Error;

/// Stable code carried by the expired password rejection.
pub const PASSWORD_EXPIRED: &str = "PASSWORD_EXPIRED";

/// Faults; these are never policy decisions.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Value(ValueError),
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),
    #[error("misconfiguration: {0}")]
    Misconfiguration(String),
}

impl From<ValueError> for Error {
    fn from(val: ValueError) -> Self {
        match val {
            ValueError::Backend(e) => Error::Backend(e),
            e => Error::Value(e),
        }
    }
}

/// Rejections of an authentication attempt.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AuthenticationError {
    #[error("Invalid Credentials")]
    InvalidCredentials,
    #[error("UnknownUser")]
    UnknownUser,
    #[error("Restricted")]
    Restricted,
    #[error(transparent)]
    PasswordExpired(#[from] PasswordExpired),
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct PasswordExpired {
    pub message: String,
    pub reset_url: String,
}

impl AuthenticationError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthenticationError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthenticationError::UnknownUser => "UNKNOWN_USER",
            AuthenticationError::Restricted => "RESTRICTED",
            AuthenticationError::PasswordExpired(_) => PASSWORD_EXPIRED,
        }
    }
}

impl PasswordExpired {
    pub fn new(reset_url: impl Into<String>) -> Self {
        let reset_url = reset_url.into();
        Self {
            message: format!("You must reset your password: {reset_url}"),
            reset_url,
        }
    }

    /// The message as markup suitable for a login form.
    pub fn to_html(&self) -> String {
        format!(
            "<strong>ERROR</strong>: You must <a href=\"{}\">reset your password</a>.",
            html_escape::encode_double_quoted_attribute(&self.reset_url),
        )
    }
}
