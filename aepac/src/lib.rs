pub mod error;
pub mod hooks;
pub mod policy;

pub use policy::Policy;
