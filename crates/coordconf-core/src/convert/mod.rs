//! Conversion of raw configuration strings into typed values

mod traits;
mod standard;

pub use traits::{Converted, TypeConverter};
pub use standard::StandardConverter;
