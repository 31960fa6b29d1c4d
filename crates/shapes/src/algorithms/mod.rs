pub mod preprocessing;
pub mod extraction;
pub mod approximation;
pub mod classification;

pub use preprocessing::*;
pub use extraction::*;
pub use approximation::*;
pub use classification::*;
