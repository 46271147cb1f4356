//! Builder for lookups that combine names, coordinates and defaults

use super::error::{ConfigError, ConfigResult};
use super::traits::{enforce_required, Configurations, ConfigurationsExt};
use crate::convert::Converted;
use crate::types::{ConfigType, Coordinates, TypeDescriptor};

#[derive(Debug, Clone, Copy)]
enum Scope<'a> {
    /// The provider's own coordinates
    Ambient,
    Explicit(Option<&'a Coordinates>),
}

/// A lookup being assembled
///
/// Created by [`ConfigurationsExt::lookup`] or
/// [`ConfigurationsExt::lookup_any`]. A lookup with a single name goes
/// straight to [`Configurations::resolve`]; a lookup with several names uses
/// [`ConfigurationsExt::resolve_any`].
///
/// # Example
///
/// ```
/// use coordconf_core::{ConfigurationsExt, Coordinates, MemoryConfigurations};
///
/// let prod = Coordinates::new().with("environment", "prod");
/// let config = MemoryConfigurations::new()
///     .with_value("port", "8080")
///     .with_scoped_value(prod.clone(), "port", "443");
///
/// let port = config
///     .lookup("server.port")
///     .or_name("port")
///     .with_coordinates(&prod)
///     .get::<u16>()
///     .unwrap();
/// assert_eq!(port, Some(443));
/// ```
pub struct Lookup<'a, C: ?Sized> {
    configurations: &'a C,
    names: Vec<String>,
    scope: Scope<'a>,
    default_value: Option<String>,
}

impl<'a, C: Configurations + ?Sized> Lookup<'a, C> {
    pub(crate) fn new(configurations: &'a C, names: Vec<String>) -> Self {
        Self {
            configurations,
            names,
            scope: Scope::Ambient,
            default_value: None,
        }
    }

    /// Add a fallback name, tried after the ones already given
    pub fn or_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Look up under explicit coordinates instead of the provider's own
    pub fn with_coordinates(mut self, coordinates: &'a Coordinates) -> Self {
        self.scope = Scope::Explicit(Some(coordinates));
        self
    }

    /// Look up without any coordinates
    pub fn unscoped(mut self) -> Self {
        self.scope = Scope::Explicit(None);
        self
    }

    /// Raw value converted when no name has a value
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Coordinates the lookup will run under
    pub fn coordinates(&self) -> Option<&'a Coordinates> {
        match self.scope {
            Scope::Ambient => self.configurations.configuration_coordinates(),
            Scope::Explicit(coordinates) => coordinates,
        }
    }

    /// Run the lookup for an arbitrary target descriptor
    pub fn get_as(self, target: &TypeDescriptor) -> ConfigResult<Option<Converted>> {
        let coordinates = self.coordinates();
        let default_value = self.default_value.as_deref();
        match self.names.as_slice() {
            [name] => {
                let value = self
                    .configurations
                    .resolve(coordinates, name, target, default_value)?;
                enforce_required(self.configurations, &[name], value)
            }
            names => self
                .configurations
                .resolve_any(coordinates, names, target, default_value),
        }
    }

    /// Run the lookup for a Rust type
    pub fn get<T: ConfigType>(self) -> ConfigResult<Option<T>> {
        let label = self.names.join(" | ");
        let value = self.get_as(&T::descriptor())?;
        downcast(&label, value)
    }

    /// Run the lookup as a string
    pub fn string(self) -> ConfigResult<Option<String>> {
        self.get::<String>()
    }
}

/// Unbox a converted value as `T`
pub(crate) fn downcast<T: ConfigType>(name: &str, value: Option<Converted>) -> ConfigResult<Option<T>> {
    match value {
        None => Ok(None),
        Some(value) => value
            .downcast::<T>()
            .map(|boxed| Some(*boxed))
            .map_err(|_| ConfigError::TypeMismatch {
                name: name.to_string(),
                target: T::descriptor(),
            }),
    }
}
