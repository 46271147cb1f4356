//! Configuration coordinates

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The scope of a configuration lookup
///
/// Coordinates are an ordered set of axis/value pairs such as
/// `environment=prod` or `module=billing`. Axis names are unique.
///
/// Lookups take `Option<&Coordinates>`: `None` means no scoping was
/// requested at all, which is not the same thing as an empty set of axes.
///
/// # Example
///
/// ```
/// use coordconf_core::Coordinates;
///
/// let coordinates = Coordinates::new()
///     .with("environment", "prod")
///     .with("module", "billing");
///
/// assert_eq!(coordinates.get("environment"), Some("prod"));
/// assert_eq!(coordinates.to_string(), "{environment=prod, module=billing}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coordinates(BTreeMap<String, String>);

impl Coordinates {
    /// Create an empty set of coordinates
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add (or replace) an axis
    pub fn with(mut self, axis: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(axis.into(), value.into());
        self
    }

    /// Get the value of an axis
    pub fn get(&self, axis: &str) -> Option<&str> {
        self.0.get(axis).map(String::as_str)
    }

    /// Check whether an axis is present
    pub fn contains_axis(&self, axis: &str) -> bool {
        self.0.contains_key(axis)
    }

    /// Number of axes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over axis/value pairs in axis order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether every axis of `self` is present in `other` with the same value
    ///
    /// The empty set is a subset of everything.
    pub fn is_subset_of(&self, other: &Coordinates) -> bool {
        self.0
            .iter()
            .all(|(axis, value)| other.0.get(axis) == Some(value))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (axis, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", axis, value)?;
        }
        f.write_str("}")
    }
}

impl From<BTreeMap<String, String>> for Coordinates {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for Coordinates
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Render an optional scope for diagnostics
pub(crate) fn describe_scope(coordinates: &Option<Coordinates>) -> String {
    match coordinates {
        Some(c) => c.to_string(),
        None => "no coordinates".to_string(),
    }
}
