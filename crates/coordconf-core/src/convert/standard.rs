//! Built-in string conversions

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::traits::{Converted, TypeConverter};
use crate::configurations::{ConfigError, ConfigResult};
use crate::types::{ConfigType, TypeDescriptor};

type ConvertFn = Box<dyn Fn(&str) -> Result<Converted, String> + Send + Sync>;

/// A converter backed by a table of per-type conversion functions
///
/// `StandardConverter::new()` knows `String`, `bool`, `char`, the integer
/// and float primitives, `PathBuf`, and a `Vec<T>` of each of those (written
/// as a comma-separated list). Additional conversions can be registered
/// before the converter is shared.
///
/// # Example
///
/// ```
/// use coordconf_core::convert::{StandardConverter, TypeConverter};
/// use coordconf_core::TypeDescriptor;
///
/// let converter = StandardConverter::new();
/// let ports = converter
///     .convert("80, 443", &TypeDescriptor::of::<Vec<u16>>())
///     .unwrap();
/// assert_eq!(ports.downcast_ref::<Vec<u16>>(), Some(&vec![80, 443]));
/// ```
pub struct StandardConverter {
    conversions: HashMap<TypeDescriptor, ConvertFn>,
    types: HashSet<TypeDescriptor>,
}

impl Default for StandardConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardConverter {
    /// Create a converter with the built-in conversions
    pub fn new() -> Self {
        let mut converter = Self::empty();
        converter.register::<String, _>(|raw| Ok(raw.to_string()));
        converter.register::<Vec<String>, _>(|raw| Ok(split_list(raw).map(str::to_string).collect()));
        converter.register::<bool, _>(parse_bool);
        converter.register::<Vec<bool>, _>(|raw| split_list(raw).map(parse_bool).collect());
        converter.register::<char, _>(parse_char);
        converter.register::<Vec<char>, _>(|raw| split_list(raw).map(parse_char).collect());
        converter.register::<PathBuf, _>(|raw| Ok(PathBuf::from(raw)));
        converter.register::<Vec<PathBuf>, _>(|raw| Ok(split_list(raw).map(PathBuf::from).collect()));

        converter.register_parsed::<i8>();
        converter.register_parsed::<i16>();
        converter.register_parsed::<i32>();
        converter.register_parsed::<i64>();
        converter.register_parsed::<isize>();
        converter.register_parsed::<u8>();
        converter.register_parsed::<u16>();
        converter.register_parsed::<u32>();
        converter.register_parsed::<u64>();
        converter.register_parsed::<usize>();
        converter.register_parsed::<f32>();
        converter.register_parsed::<f64>();
        converter
    }

    /// Create a converter with no conversions at all
    pub fn empty() -> Self {
        Self {
            conversions: HashMap::new(),
            types: HashSet::new(),
        }
    }

    /// Register a conversion, replacing any existing one for `T`
    pub fn register<T, F>(&mut self, convert: F) -> &mut Self
    where
        T: ConfigType,
        F: Fn(&str) -> Result<T, String> + Send + Sync + 'static,
    {
        let descriptor = T::descriptor();
        self.types.insert(descriptor.clone());
        self.conversions.insert(
            descriptor,
            Box::new(move |raw| convert(raw).map(|value| Box::new(value) as Converted)),
        );
        self
    }

    /// Register a `FromStr` conversion for `T` and for `Vec<T>`
    ///
    /// Surrounding whitespace is ignored.
    pub fn register_parsed<T>(&mut self) -> &mut Self
    where
        T: ConfigType + FromStr,
        T::Err: fmt::Display,
    {
        self.register::<T, _>(parse_trimmed::<T>);
        self.register::<Vec<T>, _>(|raw| split_list(raw).map(parse_trimmed::<T>).collect())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_conversion<T, F>(mut self, convert: F) -> Self
    where
        T: ConfigType,
        F: Fn(&str) -> Result<T, String> + Send + Sync + 'static,
    {
        self.register::<T, F>(convert);
        self
    }
}

impl fmt::Debug for StandardConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.types.iter().map(ToString::to_string).collect();
        types.sort();
        f.debug_struct("StandardConverter")
            .field("types", &types)
            .finish()
    }
}

impl TypeConverter for StandardConverter {
    fn conversion_types(&self) -> &HashSet<TypeDescriptor> {
        &self.types
    }

    fn convert(&self, raw: &str, target: &TypeDescriptor) -> ConfigResult<Converted> {
        let convert = self.conversions.get(target).ok_or_else(|| {
            ConfigError::conversion(raw, target, format!("no conversion registered for {}", target))
        })?;
        convert(raw).map_err(|reason| ConfigError::conversion(raw, target, reason))
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    let raw = raw.trim();
    let parts = if raw.is_empty() { None } else { Some(raw.split(',').map(str::trim)) };
    parts.into_iter().flatten()
}

fn parse_trimmed<T>(raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| e.to_string())
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("'{}' is not a boolean", other)),
    }
}

fn parse_char(raw: &str) -> Result<char, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("expected exactly one character, got {}", raw.chars().count())),
    }
}
