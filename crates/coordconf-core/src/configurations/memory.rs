//! In-memory configurations provider

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::traits::Configurations;
use crate::convert::{Converted, StandardConverter, TypeConverter};
use crate::logging::{Logger, SharedLogger, TracingLogger};
use crate::types::{Coordinates, TypeDescriptor};
use crate::{log_debug, log_warn};

/// A raw configuration value scoped to a set of coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Property name
    pub name: String,
    /// Coordinates the value applies to; empty means everywhere
    #[serde(default, skip_serializing_if = "Coordinates::is_empty")]
    pub coordinates: Coordinates,
    /// Raw, unconverted value
    pub value: String,
}

impl ConfigEntry {
    /// Create an unscoped entry
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coordinates: Coordinates::new(),
            value: value.into(),
        }
    }

    /// Scope the entry to coordinates
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = coordinates;
        self
    }

    /// Number of axes the entry is scoped to
    pub fn specificity(&self) -> usize {
        self.coordinates.len()
    }
}

/// Serialized form of a [`MemoryConfigurations`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Provider coordinates used when callers supply none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Configured values
    #[serde(default)]
    pub values: Vec<ConfigEntry>,
}

/// In-memory configurations provider
///
/// An entry is eligible for a lookup when its coordinates are a subset of
/// the lookup's coordinates. Unscoped entries are eligible everywhere, and a
/// lookup without coordinates only sees unscoped entries. Among eligible
/// entries the most specific ones win; if those disagree on the value the
/// lookup fails with `ConfigError::Ambiguous`.
///
/// # Thread Safety
///
/// Entries live behind a `RwLock`, so the provider can be shared and
/// updated from multiple threads.
///
/// # Example
///
/// ```
/// use coordconf_core::{ConfigurationsExt, Coordinates, MemoryConfigurations};
///
/// let prod = Coordinates::new().with("environment", "prod");
/// let config = MemoryConfigurations::new()
///     .with_value("pool.size", "4")
///     .with_scoped_value(prod.clone(), "pool.size", "32")
///     .with_coordinates(prod);
///
/// assert_eq!(config.get::<u32>("pool.size").unwrap(), Some(32));
/// assert_eq!(config.get_in::<u32>(None, "pool.size").unwrap(), Some(4));
/// ```
pub struct MemoryConfigurations {
    entries: RwLock<Vec<ConfigEntry>>,
    coordinates: Option<Coordinates>,
    required: HashSet<String>,
    converter: Arc<dyn TypeConverter>,
    logger: SharedLogger,
}

impl Default for MemoryConfigurations {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConfigurations {
    /// Create an empty provider with the standard converter
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            coordinates: None,
            required: HashSet::new(),
            converter: Arc::new(StandardConverter::new()),
            logger: Arc::new(TracingLogger),
        }
    }

    /// Create a provider from a snapshot
    ///
    /// Entries are kept as listed, so two entries with the same name and
    /// coordinates but different values make that name ambiguous.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut provider = Self::new();
        provider.coordinates = snapshot.coordinates;
        provider.entries = RwLock::new(snapshot.values);
        provider
    }

    /// Create a provider from a YAML snapshot
    ///
    /// ```yaml
    /// coordinates: { environment: prod }
    /// values:
    ///   - name: db.url
    ///     value: jdbc:test
    ///   - name: port
    ///     coordinates: { environment: prod }
    ///     value: "8443"
    /// ```
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let snapshot: Snapshot = serde_yaml::from_str(yaml)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Current contents as a snapshot
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            coordinates: self.coordinates.clone(),
            values: self.entries(),
        }
    }

    /// Serialize the current contents as YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(&self.snapshot())?)
    }

    /// Use a different converter
    pub fn with_converter(mut self, converter: Arc<dyn TypeConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Set the provider's own coordinates
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Fail lookups of `name` that find neither a value nor a default
    ///
    /// A lookup over several names only fails once every name and the
    /// default have been tried.
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.insert(name.into());
        self
    }

    /// Builder-style [`set`](Self::set)
    pub fn with_value(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder-style [`set_in`](Self::set_in)
    pub fn with_scoped_value(
        self,
        coordinates: Coordinates,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set_in(coordinates, name, value);
        self
    }

    /// Set an unscoped value
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.set_in(Coordinates::new(), name, value);
    }

    /// Set a value for exact coordinates, replacing any previous value there
    pub fn set_in(&self, coordinates: Coordinates, name: impl Into<String>, value: impl Into<String>) {
        let entry = ConfigEntry::new(name, value).with_coordinates(coordinates);
        let mut entries = self.entries.write();
        match entries
            .iter()
            .position(|e| e.name == entry.name && e.coordinates == entry.coordinates)
        {
            Some(pos) => entries[pos] = entry,
            None => entries.push(entry),
        }
    }

    /// Add an entry without replacing existing ones
    pub fn insert(&self, entry: ConfigEntry) {
        self.entries.write().push(entry);
    }

    /// Remove every value for `name` at exactly `coordinates`
    pub fn remove(&self, coordinates: &Coordinates, name: &str) -> bool {
        let mut entries = self.entries.write();
        let original_len = entries.len();
        entries.retain(|e| !(e.name == name && &e.coordinates == coordinates));
        entries.len() != original_len
    }

    /// Remove all values
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn entries(&self) -> Vec<ConfigEntry> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the raw value for `name` under `coordinates`
    fn find_raw(&self, coordinates: Option<&Coordinates>, name: &str) -> ConfigResult<Option<String>> {
        let entries = self.entries.read();
        let eligible: Vec<&ConfigEntry> = entries
            .iter()
            .filter(|e| e.name == name)
            .filter(|e| match coordinates {
                Some(scope) => e.coordinates.is_subset_of(scope),
                None => e.coordinates.is_empty(),
            })
            .collect();

        let Some(specificity) = eligible.iter().map(|e| e.specificity()).max() else {
            return Ok(None);
        };

        let mut values: Vec<String> = Vec::new();
        for entry in eligible.iter().filter(|e| e.specificity() == specificity) {
            if !values.contains(&entry.value) {
                values.push(entry.value.clone());
            }
        }

        if values.len() > 1 {
            log_warn!(
                self.logger,
                "'{}' has {} conflicting values at specificity {}",
                name,
                values.len(),
                specificity
            );
            return Err(ConfigError::ambiguous(name, coordinates, values));
        }
        Ok(values.pop())
    }
}

impl std::fmt::Debug for MemoryConfigurations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryConfigurations")
            .field("entries", &self.len())
            .field("coordinates", &self.coordinates)
            .field("required", &self.required)
            .finish()
    }
}

impl Configurations for MemoryConfigurations {
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
        let raw = match self.find_raw(coordinates, name)? {
            Some(raw) => raw,
            None => match default_value {
                Some(default_value) => {
                    log_debug!(self.logger, "'{}' not configured, using default", name);
                    default_value.to_string()
                }
                None => return Ok(None),
            },
        };
        self.converter.convert(&raw, target).map(Some)
    }

    fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }
}
