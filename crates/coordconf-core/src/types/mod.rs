//! Core types shared by resolvers, converters and providers

mod coordinates;
mod descriptor;

pub use coordinates::Coordinates;
pub(crate) use coordinates::describe_scope;
pub use descriptor::{ConfigType, TypeDescriptor};
