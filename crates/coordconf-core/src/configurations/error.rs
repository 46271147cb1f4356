//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{describe_scope, Coordinates, TypeDescriptor};

/// Errors that can occur while resolving configuration values
///
/// Every variant is a configuration error. Two families get their own
/// predicates because callers usually want to tell them apart:
/// conversion failures ([`is_conversion`](Self::is_conversion)) and
/// contradictory values ([`is_ambiguous`](Self::is_ambiguous)).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The provider requires a value that is neither configured nor defaulted
    #[error("No value configured for required property '{name}'")]
    Missing { name: String },

    /// A raw value (or default) could not be converted to the target type
    #[error("Cannot convert {raw:?} to {target}: {reason}")]
    Conversion {
        raw: String,
        target: TypeDescriptor,
        reason: String,
    },

    /// A provider produced a value that is not of the requested Rust type
    #[error("Value for '{name}' is not a {target}")]
    TypeMismatch { name: String, target: TypeDescriptor },

    /// Two or more equally eligible raw values exist for one lookup
    #[error("Ambiguous value for '{name}' under {}: {values:?}", describe_scope(.coordinates))]
    Ambiguous {
        name: String,
        coordinates: Option<Coordinates>,
        values: Vec<String>,
    },

    /// A multi-name lookup was given no names
    #[error("At least one property name is required")]
    NoNames,

    /// The provider registry has nothing to instantiate
    #[error("No {contract} implementation registered")]
    NoProvider { contract: String },

    /// A manifest named an implementation the registry does not know
    #[error("Unknown configurations implementation: {name}")]
    UnknownProvider { name: String },

    /// A registered factory failed
    #[error("Failed to instantiate configurations implementation '{implementation}': {source}")]
    Instantiation {
        implementation: String,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("Cannot read service manifest {}: {source}", .path.display())]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed service manifest for {contract} (line {line}): {reason}")]
    MalformedManifest {
        contract: String,
        line: usize,
        reason: String,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Other(String),
}

impl ConfigError {
    /// Create a conversion error
    pub fn conversion(raw: impl Into<String>, target: &TypeDescriptor, reason: impl Into<String>) -> Self {
        Self::Conversion {
            raw: raw.into(),
            target: target.clone(),
            reason: reason.into(),
        }
    }

    /// Create an ambiguity error
    pub fn ambiguous(name: impl Into<String>, coordinates: Option<&Coordinates>, values: Vec<String>) -> Self {
        Self::Ambiguous {
            name: name.into(),
            coordinates: coordinates.cloned(),
            values,
        }
    }

    /// Create a missing-value error
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }

    /// Whether a value was present but unusable as the requested type
    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion { .. } | Self::TypeMismatch { .. })
    }

    /// Whether the configuration is contradictory
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_carries_diagnostics() {
        let err = ConfigError::conversion("eighty", &TypeDescriptor::of::<u16>(), "invalid digit");
        assert!(err.is_conversion());
        assert!(!err.is_ambiguous());
        assert_eq!(err.to_string(), "Cannot convert \"eighty\" to u16: invalid digit");
    }

    #[test]
    fn test_ambiguous_message() {
        let coordinates = Coordinates::new().with("environment", "prod");
        let err = ConfigError::ambiguous("a", Some(&coordinates), vec!["1".into(), "2".into()]);
        assert!(err.is_ambiguous());
        assert_eq!(
            err.to_string(),
            "Ambiguous value for 'a' under {environment=prod}: [\"1\", \"2\"]"
        );

        let unscoped = ConfigError::ambiguous("a", None, vec![]);
        assert!(unscoped.to_string().contains("no coordinates"));
    }

    #[test]
    fn test_instantiation_keeps_cause() {
        use std::error::Error;

        let err = ConfigError::Instantiation {
            implementation: "memory".into(),
            source: Box::new(ConfigError::Other("boom".into())),
        };
        assert_eq!(err.source().unwrap().to_string(), "Configuration error: boom");
    }
}
