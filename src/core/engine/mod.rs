pub mod traits;
pub mod utils;
