pub mod ac;
pub mod clock;
pub mod error;
pub mod freshness;
pub mod platform;

pub(crate) mod chrono {
    #[cfg(not(test))]
    pub use ::chrono::Utc;
    #[cfg(test)]
    pub use test_aep::chrono::Utc;
}
