//! Type converter trait

use std::any::Any;
use std::collections::HashSet;

use crate::configurations::ConfigResult;
use crate::types::TypeDescriptor;

/// A converted configuration value
///
/// The concrete type is the Rust type whose [`ConfigType`](crate::ConfigType)
/// descriptor was requested; typed lookups downcast it.
pub type Converted = Box<dyn Any + Send + Sync>;

/// Converts raw configuration strings into typed values
///
/// Implementations:
/// - `StandardConverter`: `FromStr`-based conversions for primitives,
///   paths and comma-separated lists, extensible with custom conversions
pub trait TypeConverter: Send + Sync {
    /// The target types this converter advertises
    ///
    /// Computed once; must not change for the converter's lifetime.
    fn conversion_types(&self) -> &HashSet<TypeDescriptor>;

    /// Convert `raw` to the type described by `target`
    ///
    /// Fails with `ConfigError::Conversion` when the value cannot be
    /// converted, including when `target` is not a supported type.
    fn convert(&self, raw: &str, target: &TypeDescriptor) -> ConfigResult<Converted>;

    /// Check whether a target type is advertised
    fn supports(&self, target: &TypeDescriptor) -> bool {
        self.conversion_types().contains(target)
    }
}
