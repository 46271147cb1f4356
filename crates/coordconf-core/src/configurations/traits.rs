//! The configurations contract and its derived lookup surface

use std::collections::HashSet;

use super::error::{ConfigError, ConfigResult};
use super::lookup::{downcast, Lookup};
use crate::convert::Converted;
use crate::log_debug;
use crate::logging::{Logger, TracingLogger};
use crate::types::{ConfigType, Coordinates, TypeDescriptor};

/// A single source of configuration values for an application
///
/// [`resolve`](Self::resolve) is the only lookup an implementation has to
/// supply. Every convenience lookup in [`ConfigurationsExt`] reduces to it.
///
/// Implementations:
/// - `MemoryConfigurations`: In-memory, coordinate-aware reference provider
///
/// Implementations must be safe for concurrent reads; the lookup surface
/// itself keeps no state.
pub trait Configurations: Send + Sync {
    /// The target types this provider advertises it can convert to
    ///
    /// Advertised only: lookups for other types are still passed to
    /// [`resolve`](Self::resolve).
    fn conversion_types(&self) -> &HashSet<TypeDescriptor>;

    /// Coordinates used when a caller does not supply any
    fn configuration_coordinates(&self) -> Option<&Coordinates>;

    /// Look up `name` under `coordinates` and convert it to `target`
    ///
    /// Returns the converted raw value if one exists, otherwise the converted
    /// `default_value`, otherwise `None`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::Conversion` if the raw value or default cannot be
    ///   converted
    /// - `ConfigError::Ambiguous` if two or more equally eligible raw values
    ///   exist; this is never settled by picking one
    ///
    /// Returning `None` for a [required](Self::is_required) name is correct
    /// here: the lookup surface raises `ConfigError::Missing` once the whole
    /// request, fallback names and default included, has produced nothing.
    fn resolve(
        &self,
        coordinates: Option<&Coordinates>,
        name: &str,
        target: &TypeDescriptor,
        default_value: Option<&str>,
    ) -> ConfigResult<Option<Converted>>;

    /// Whether a lookup that ends without any value for `name` is an error
    fn is_required(&self, _name: &str) -> bool {
        false
    }

    /// Logger used by the lookup surface
    fn logger(&self) -> &dyn Logger {
        &TracingLogger
    }
}

/// Fail with `Missing` when a finished lookup produced nothing for a required name
pub(crate) fn enforce_required<C, S>(
    configurations: &C,
    names: &[S],
    value: Option<Converted>,
) -> ConfigResult<Option<Converted>>
where
    C: Configurations + ?Sized,
    S: AsRef<str>,
{
    if value.is_some() {
        return Ok(value);
    }
    match names.iter().find(|name| configurations.is_required(name.as_ref())) {
        Some(name) => Err(ConfigError::missing(name.as_ref())),
        None => Ok(None),
    }
}

/// Convenience lookups derived from [`Configurations::resolve`]
///
/// Implemented for every `Configurations`, including `dyn Configurations`.
/// Methods without a coordinates argument use
/// [`configuration_coordinates`](Configurations::configuration_coordinates).
///
/// # Example
///
/// ```
/// use coordconf_core::{ConfigurationsExt, MemoryConfigurations};
///
/// let config = MemoryConfigurations::new().with_value("database.url", "jdbc:test");
///
/// let url = config.get_any_string(&["db.url", "database.url"]).unwrap();
/// assert_eq!(url.as_deref(), Some("jdbc:test"));
///
/// let port: Option<u16> = config.get_or("port", "8080").unwrap();
/// assert_eq!(port, Some(8080));
/// ```
pub trait ConfigurationsExt: Configurations {
    /// Look up the first of several names that has a value
    ///
    /// Every name is tried in order without the default first. Only when none
    /// of them has a value are they tried again, in the same order, with
    /// `default_value`. A real value for any name therefore always beats a
    /// default. Errors abort the search immediately.
    ///
    /// If both passes find nothing and any of the names is required, the
    /// lookup fails with `ConfigError::Missing` naming the first of them.
    fn resolve_any<S: AsRef<str>>(
        &self,
        coordinates: Option<&Coordinates>,
        names: &[S],
        target: &TypeDescriptor,
        default_value: Option<&str>,
    ) -> ConfigResult<Option<Converted>> {
        if names.is_empty() {
            return Err(ConfigError::NoNames);
        }

        let logger = self.logger();
        let labels: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        log_debug!(
            logger,
            "resolve_any: names={:?} target={} default={:?} coordinates={:?}",
            labels,
            target,
            default_value,
            coordinates.map(ToString::to_string)
        );

        for name in &labels {
            if let Some(value) = self.resolve(coordinates, name, target, None)? {
                log_debug!(logger, "resolve_any: '{}' has a value", name);
                return Ok(Some(value));
            }
        }

        for name in &labels {
            if let Some(value) = self.resolve(coordinates, name, target, default_value)? {
                log_debug!(logger, "resolve_any: '{}' resolved with default", name);
                return Ok(Some(value));
            }
        }

        log_debug!(logger, "resolve_any: no value for {:?}", labels);
        enforce_required(self, labels.as_slice(), None)
    }

    /// Typed lookup
    fn get<T: ConfigType>(&self, name: &str) -> ConfigResult<Option<T>> {
        self.get_in(self.configuration_coordinates(), name)
    }

    /// Typed lookup with a raw default
    fn get_or<T: ConfigType>(&self, name: &str, default_value: &str) -> ConfigResult<Option<T>> {
        self.get_in_or(self.configuration_coordinates(), name, default_value)
    }

    /// Typed lookup under explicit coordinates
    fn get_in<T: ConfigType>(&self, coordinates: Option<&Coordinates>, name: &str) -> ConfigResult<Option<T>> {
        let value = self.resolve(coordinates, name, &T::descriptor(), None)?;
        downcast(name, enforce_required(self, &[name], value)?)
    }

    /// Typed lookup under explicit coordinates with a raw default
    fn get_in_or<T: ConfigType>(
        &self,
        coordinates: Option<&Coordinates>,
        name: &str,
        default_value: &str,
    ) -> ConfigResult<Option<T>> {
        let value = self.resolve(coordinates, name, &T::descriptor(), Some(default_value))?;
        downcast(name, enforce_required(self, &[name], value)?)
    }

    fn get_string(&self, name: &str) -> ConfigResult<Option<String>> {
        self.get::<String>(name)
    }

    fn get_string_or(&self, name: &str, default_value: &str) -> ConfigResult<Option<String>> {
        self.get_or::<String>(name, default_value)
    }

    /// Typed multi-name lookup, see [`resolve_any`](Self::resolve_any)
    fn get_any<T: ConfigType, S: AsRef<str>>(&self, names: &[S]) -> ConfigResult<Option<T>> {
        let value = self.resolve_any(self.configuration_coordinates(), names, &T::descriptor(), None)?;
        downcast(&join_names(names), value)
    }

    /// Typed multi-name lookup with a raw default
    fn get_any_or<T: ConfigType, S: AsRef<str>>(
        &self,
        names: &[S],
        default_value: &str,
    ) -> ConfigResult<Option<T>> {
        let value = self.resolve_any(
            self.configuration_coordinates(),
            names,
            &T::descriptor(),
            Some(default_value),
        )?;
        downcast(&join_names(names), value)
    }

    fn get_any_string<S: AsRef<str>>(&self, names: &[S]) -> ConfigResult<Option<String>> {
        self.get_any::<String, S>(names)
    }

    /// Start a lookup for one name
    fn lookup(&self, name: impl Into<String>) -> Lookup<'_, Self> {
        Lookup::new(self, vec![name.into()])
    }

    /// Start a lookup over several names, tried in order
    fn lookup_any<I, S>(&self, names: I) -> Lookup<'_, Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Lookup::new(self, names.into_iter().map(Into::into).collect())
    }
}

impl<T: Configurations + ?Sized> ConfigurationsExt for T {}

fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    names.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(" | ")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::convert::{StandardConverter, TypeConverter};
    use crate::logging::NoOpLogger;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// One recorded `resolve` call
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Call {
        pub name: String,
        pub default_value: Option<String>,
        pub coordinates: Option<Coordinates>,
    }

    /// A provider with fixed values that records every `resolve` call
    pub(crate) struct ScriptedConfigurations {
        values: HashMap<String, String>,
        ambiguous: Vec<String>,
        coordinates: Option<Coordinates>,
        converter: StandardConverter,
        calls: Mutex<Vec<Call>>,
    }

    impl ScriptedConfigurations {
        pub fn new() -> Self {
            Self {
                values: HashMap::new(),
                ambiguous: Vec::new(),
                coordinates: None,
                converter: StandardConverter::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn with_value(mut self, name: &str, value: &str) -> Self {
            self.values.insert(name.to_string(), value.to_string());
            self
        }

        pub fn with_ambiguous(mut self, name: &str) -> Self {
            self.ambiguous.push(name.to_string());
            self
        }

        pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
            self.coordinates = Some(coordinates);
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        pub fn called_names(&self) -> Vec<(String, Option<String>)> {
            self.calls()
                .into_iter()
                .map(|c| (c.name, c.default_value))
                .collect()
        }
    }

    impl Configurations for ScriptedConfigurations {
        fn conversion_types(&self) -> &HashSet<TypeDescriptor> {
            self.converter.conversion_types()
        }

        fn configuration_coordinates(&self) -> Option<&Coordinates> {
            self.coordinates.as_ref()
        }

        fn resolve(
            &self,
            coordinates: Option<&Coordinates>,
            name: &str,
            target: &TypeDescriptor,
            default_value: Option<&str>,
        ) -> ConfigResult<Option<Converted>> {
            self.calls.lock().push(Call {
                name: name.to_string(),
                default_value: default_value.map(str::to_string),
                coordinates: coordinates.cloned(),
            });
            if self.ambiguous.iter().any(|n| n == name) {
                return Err(ConfigError::ambiguous(name, coordinates, vec!["x".into(), "y".into()]));
            }
            match self.values.get(name).map(String::as_str).or(default_value) {
                Some(raw) => self.converter.convert(raw, target).map(Some),
                None => Ok(None),
            }
        }

        fn logger(&self) -> &dyn Logger {
            &NoOpLogger
        }
    }

    fn called(pairs: &[(&str, Option<&str>)]) -> Vec<(String, Option<String>)> {
        pairs
            .iter()
            .map(|(n, d)| (n.to_string(), d.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_second_name_wins_without_default() {
        let config = ScriptedConfigurations::new().with_value("database.url", "jdbc:test");

        let url = config.get_any_string(&["db.url", "database.url"]).unwrap();

        assert_eq!(url.as_deref(), Some("jdbc:test"));
        assert_eq!(
            config.called_names(),
            called(&[("db.url", None), ("database.url", None)])
        );
    }

    #[test]
    fn test_default_is_converted() {
        let config = ScriptedConfigurations::new();

        let port: Option<i64> = config.get_any_or(&["port"], "8080").unwrap();

        assert_eq!(port, Some(8080));
        assert_eq!(
            config.called_names(),
            called(&[("port", None), ("port", Some("8080"))])
        );
    }

    #[test]
    fn test_nothing_configured_is_absent_after_two_passes() {
        let config = ScriptedConfigurations::new();

        let value = config.get_any_string(&["a", "b"]).unwrap();

        assert_eq!(value, None);
        assert_eq!(
            config.called_names(),
            called(&[("a", None), ("b", None), ("a", None), ("b", None)])
        );
    }

    #[test]
    fn test_default_consulted_only_after_every_name() {
        let config = ScriptedConfigurations::new();

        let value = config.get_any_or::<String, _>(&["a", "b"], "fallback").unwrap();

        assert_eq!(value.as_deref(), Some("fallback"));
        // The first name accepts the default, so "b" is not tried again.
        assert_eq!(
            config.called_names(),
            called(&[("a", None), ("b", None), ("a", Some("fallback"))])
        );
    }

    #[test]
    fn test_real_value_never_applies_default_or_later_names() {
        let config = ScriptedConfigurations::new()
            .with_value("b", "2")
            .with_value("c", "3");

        let value: Option<u8> = config.get_any_or(&["a", "b", "c"], "9").unwrap();

        assert_eq!(value, Some(2));
        assert_eq!(config.called_names(), called(&[("a", None), ("b", None)]));
    }

    #[test]
    fn test_ambiguity_aborts_the_search() {
        let config = ScriptedConfigurations::new()
            .with_ambiguous("a")
            .with_value("b", "fine");

        let err = config.get_string("a").unwrap_err();
        assert!(err.is_ambiguous());

        let config = ScriptedConfigurations::new()
            .with_ambiguous("a")
            .with_value("b", "fine");
        let err = config.get_any_string(&["a", "b"]).unwrap_err();

        assert!(err.is_ambiguous());
        assert_eq!(config.called_names(), called(&[("a", None)]));
    }

    #[test]
    fn test_ambiguity_in_later_name_still_aborts() {
        let config = ScriptedConfigurations::new().with_ambiguous("b").with_value("c", "3");

        let err = config.get_any_string(&["a", "b", "c"]).unwrap_err();

        assert!(err.is_ambiguous());
        assert_eq!(config.called_names(), called(&[("a", None), ("b", None)]));
    }

    #[test]
    fn test_unconvertible_default_fails() {
        let config = ScriptedConfigurations::new();

        let err = config.get_any_or::<u16, _>(&["a", "b"], "not-a-port").unwrap_err();

        assert!(err.is_conversion());
    }

    #[test]
    fn test_unconvertible_value_stops_before_next_name() {
        let config = ScriptedConfigurations::new()
            .with_value("a", "abc")
            .with_value("b", "7");

        let err = config.get_any::<u16, _>(&["a", "b"]).unwrap_err();

        assert!(err.is_conversion());
        assert_eq!(config.called_names(), called(&[("a", None)]));
    }

    #[test]
    fn test_repeated_lookups_are_identical() {
        let config = ScriptedConfigurations::new().with_value("timeout", "30");

        let first: Option<u32> = config.get("timeout").unwrap();
        let second: Option<u32> = config.get("timeout").unwrap();

        assert_eq!(first, second);
        assert_eq!(first, Some(30));
    }

    #[test]
    fn test_empty_name_set_is_rejected() {
        let config = ScriptedConfigurations::new();
        let names: [&str; 0] = [];

        let err = config.get_any_string(&names).unwrap_err();

        assert!(matches!(err, ConfigError::NoNames));
        assert!(config.calls().is_empty());
    }

    #[test]
    fn test_ambient_and_explicit_coordinates() {
        let ambient = Coordinates::new().with("environment", "prod");
        let explicit = Coordinates::new().with("environment", "dev");
        let config = ScriptedConfigurations::new().with_coordinates(ambient.clone());

        config.get_string("a").unwrap();
        config.get_in::<String>(Some(&explicit), "a").unwrap();
        config.get_in::<String>(None, "a").unwrap();

        let scopes: Vec<_> = config.calls().into_iter().map(|c| c.coordinates).collect();
        assert_eq!(scopes, vec![Some(ambient), Some(explicit), None]);
    }

    #[test]
    fn test_list_types_are_distinct_targets() {
        let config = ScriptedConfigurations::new().with_value("ports", "80,443");

        let ints: Option<Vec<i64>> = config.get("ports").unwrap();
        let strings: Option<Vec<String>> = config.get("ports").unwrap();

        assert_eq!(ints, Some(vec![80, 443]));
        assert_eq!(strings, Some(vec!["80".to_string(), "443".to_string()]));
    }

    #[test]
    fn test_works_through_trait_objects() {
        let config: Arc<dyn Configurations> =
            Arc::new(ScriptedConfigurations::new().with_value("name", "billing"));

        assert_eq!(config.get_string("name").unwrap().as_deref(), Some("billing"));
        assert!(config.conversion_types().contains(&TypeDescriptor::string()));
    }

    struct WrongType;

    impl Configurations for WrongType {
        fn conversion_types(&self) -> &HashSet<TypeDescriptor> {
            static EMPTY: once_cell::sync::Lazy<HashSet<TypeDescriptor>> =
                once_cell::sync::Lazy::new(HashSet::new);
            &EMPTY
        }

        fn configuration_coordinates(&self) -> Option<&Coordinates> {
            None
        }

        fn resolve(
            &self,
            _coordinates: Option<&Coordinates>,
            _name: &str,
            _target: &TypeDescriptor,
            _default_value: Option<&str>,
        ) -> ConfigResult<Option<Converted>> {
            Ok(Some(Box::new("not a number".to_string())))
        }
    }

    #[test]
    fn test_wrong_rust_type_is_a_type_mismatch() {
        let err = WrongType.get::<u16>("port").unwrap_err();

        assert!(err.is_conversion());
        assert!(matches!(err, ConfigError::TypeMismatch { ref name, .. } if name == "port"));
    }
}
