pub mod account;
pub mod principal;
pub mod traits;

pub use self::account::Account;
pub use self::principal::Principal;
