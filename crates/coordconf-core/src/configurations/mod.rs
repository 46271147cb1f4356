//! The configurations contract, its lookup surface and providers
//!
//! - `Configurations` trait: the one primitive every provider implements
//! - `ConfigurationsExt` / `Lookup`: every convenience lookup, derived from it
//! - `MemoryConfigurations`: in-memory, coordinate-aware provider
//! - `ProviderRegistry` / `new_instance`: locating the provider at startup

mod error;
mod traits;
mod lookup;
mod memory;
mod manifest;
mod registry;

pub use error::{ConfigError, ConfigResult};
pub use traits::{Configurations, ConfigurationsExt};
pub use lookup::Lookup;
pub use memory::{ConfigEntry, MemoryConfigurations, Snapshot};
pub use manifest::ServiceManifest;
pub use registry::{
    default_services_dir, global_registry, list_configurations, new_instance, new_instance_from,
    register_configurations, unregister_configurations, ConfigurationsFactory,
    ProviderDefinition, ProviderRegistry, CONFIGURATIONS_CONTRACT, SERVICES_DIR_ENV_VAR,
};
