#[cfg(feature = "ac")]
pub mod ac;
#[cfg(feature = "chrono")]
pub mod chrono;
pub mod clock;
pub mod core;

mod utils;
pub use utils::*;
