pub mod geojson;
pub mod source;

pub use source::*;
