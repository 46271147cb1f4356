//! coordconf Core
//!
//! Coordinate-scoped, typed configuration lookups that work the same way
//! over any provider.
//!
//! A provider implements one primitive, [`Configurations::resolve`]: look up
//! one name under a set of [`Coordinates`] and convert it to a
//! [`TypeDescriptor`]. Everything else (ambient coordinates, typed getters,
//! defaults, fallback names) lives in [`ConfigurationsExt`] and is derived
//! from that primitive.
//!
//! ## Fallback names
//!
//! ```rust
//! use coordconf_core::{ConfigurationsExt, MemoryConfigurations};
//!
//! let config = MemoryConfigurations::new().with_value("database.url", "jdbc:test");
//!
//! // Real values for any name beat the default.
//! let url = config
//!     .lookup("db.url")
//!     .or_name("database.url")
//!     .with_default("jdbc:fallback")
//!     .string()
//!     .unwrap();
//! assert_eq!(url.as_deref(), Some("jdbc:test"));
//! ```
//!
//! ## Locating the provider
//!
//! ```rust,no_run
//! use coordconf_core::{register_configurations, new_instance, MemoryConfigurations};
//! use std::sync::Arc;
//!
//! register_configurations("memory", "In-memory values", Box::new(|| {
//!     Ok(Arc::new(MemoryConfigurations::new()))
//! }));
//! let config = new_instance().expect("a configurations implementation");
//! ```

pub mod types;
pub mod convert;
pub mod logging;
pub mod configurations;

// Re-export commonly used types
pub use types::{ConfigType, Coordinates, TypeDescriptor};

pub use convert::{Converted, StandardConverter, TypeConverter};

pub use logging::{Logger, NoOpLogger, SharedLogger, TracingLogger, init_tracing};

pub use configurations::{
    ConfigEntry, ConfigError, ConfigResult, Configurations, ConfigurationsExt, Lookup,
    MemoryConfigurations, ProviderRegistry, ServiceManifest, Snapshot,
    new_instance, new_instance_from, register_configurations, unregister_configurations, list_configurations,
    CONFIGURATIONS_CONTRACT,
};
