pub mod classification;
pub mod execution;

pub use classification::*;
pub use execution::*;
