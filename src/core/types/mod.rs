pub mod config;
mod error;
mod hash;
mod outcome;
mod stats;
mod toolchain;

pub use error::*;
pub use hash::*;
pub use outcome::*;
pub use stats::*;
pub use toolchain::*;
