//! Registry for locating the configurations implementation

use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::error::{ConfigError, ConfigResult};
use super::manifest::ServiceManifest;
use super::traits::Configurations;
use crate::logging::{Logger, SharedLogger, TracingLogger};
use crate::{log_debug, log_error};

/// Identifier of the configurations contract; also the manifest file name
pub const CONFIGURATIONS_CONTRACT: &str = "coordconf.Configurations";

/// Environment variable pointing at a directory of service manifests
pub const SERVICES_DIR_ENV_VAR: &str = "COORDCONF_SERVICES_DIR";

/// Factory function type for creating configurations implementations
pub type ConfigurationsFactory =
    Box<dyn Fn() -> ConfigResult<Arc<dyn Configurations>> + Send + Sync>;

/// Definition of a registered configurations implementation
pub struct ProviderDefinition {
    /// Unique name for this implementation
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: ConfigurationsFactory,
}

impl std::fmt::Debug for ProviderDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// An ordered set of configurations implementations
///
/// Implementations are kept in registration order. [`locate`](Self::locate)
/// instantiates the first one; the others are never consulted or merged.
///
/// # Example
///
/// ```
/// use coordconf_core::{ConfigurationsExt, MemoryConfigurations, ProviderRegistry};
/// use std::sync::Arc;
///
/// let registry = ProviderRegistry::new();
/// registry.register(
///     "memory",
///     "In-memory values",
///     Box::new(|| Ok(Arc::new(MemoryConfigurations::new().with_value("name", "demo")))),
/// );
///
/// let config = registry.locate().unwrap();
/// assert_eq!(config.get_string("name").unwrap().as_deref(), Some("demo"));
/// ```
pub struct ProviderRegistry {
    definitions: RwLock<Vec<Arc<ProviderDefinition>>>,
    logger: SharedLogger,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            definitions: RwLock::new(Vec::new()),
            logger: Arc::new(TracingLogger),
        }
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Register an implementation
    ///
    /// Registering a name again replaces the earlier definition but keeps its
    /// position.
    pub fn register(&self, name: &str, description: &str, factory: ConfigurationsFactory) {
        let definition = Arc::new(ProviderDefinition {
            name: name.to_string(),
            description: description.to_string(),
            factory,
        });
        let mut definitions = self.definitions.write();
        match definitions.iter().position(|d| d.name == name) {
            Some(pos) => definitions[pos] = definition,
            None => definitions.push(definition),
        }
    }

    /// Remove an implementation
    pub fn unregister(&self, name: &str) -> bool {
        let mut definitions = self.definitions.write();
        let original_len = definitions.len();
        definitions.retain(|d| d.name != name);
        definitions.len() != original_len
    }

    /// Check if an implementation is registered
    pub fn has(&self, name: &str) -> bool {
        self.definitions.read().iter().any(|d| d.name == name)
    }

    /// List registered implementations as (name, description) pairs, in order
    pub fn list(&self) -> Vec<(String, String)> {
        self.definitions
            .read()
            .iter()
            .map(|d| (d.name.clone(), d.description.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Instantiate the first registered implementation
    ///
    /// Fails with `NoProvider` when nothing is registered and with
    /// `Instantiation` when the first factory fails.
    pub fn locate(&self) -> ConfigResult<Arc<dyn Configurations>> {
        let first = self.definitions.read().first().cloned();
        match first {
            Some(definition) => self.instantiate(&definition),
            None => Err(ConfigError::NoProvider {
                contract: CONFIGURATIONS_CONTRACT.to_string(),
            }),
        }
    }

    /// Instantiate a specific implementation
    pub fn locate_named(&self, name: &str) -> ConfigResult<Arc<dyn Configurations>> {
        let definition = self
            .definitions
            .read()
            .iter()
            .find(|d| d.name == name)
            .cloned();
        match definition {
            Some(definition) => self.instantiate(&definition),
            None => Err(ConfigError::UnknownProvider {
                name: name.to_string(),
            }),
        }
    }

    /// Instantiate the implementation a manifest names first
    pub fn locate_from_manifest(&self, manifest: &ServiceManifest) -> ConfigResult<Arc<dyn Configurations>> {
        log_debug!(
            self.logger,
            "manifest for '{}' selects '{}'",
            manifest.contract(),
            manifest.implementation()
        );
        self.locate_named(manifest.implementation())
    }

    fn instantiate(&self, definition: &ProviderDefinition) -> ConfigResult<Arc<dyn Configurations>> {
        log_debug!(self.logger, "instantiating configurations '{}'", definition.name);
        (definition.factory)().map_err(|source| {
            log_error!(self.logger, "configurations factory '{}' failed: {}", definition.name, source);
            ConfigError::Instantiation {
                implementation: definition.name.clone(),
                source: Box::new(source),
            }
        })
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("definitions", &*self.definitions.read())
            .finish()
    }
}

/// Global registry of configurations implementations
static REGISTRY: Lazy<ProviderRegistry> = Lazy::new(ProviderRegistry::new);

/// The process-wide registry used by [`new_instance`]
pub fn global_registry() -> &'static ProviderRegistry {
    &REGISTRY
}

/// Register an implementation in the global registry
///
/// This is the bootstrap step applications run before [`new_instance`].
pub fn register_configurations(name: &str, description: &str, factory: ConfigurationsFactory) {
    REGISTRY.register(name, description, factory);
}

/// Unregister an implementation from the global registry
pub fn unregister_configurations(name: &str) -> bool {
    REGISTRY.unregister(name)
}

/// List implementations in the global registry
pub fn list_configurations() -> Vec<(String, String)> {
    REGISTRY.list()
}

/// Default directory searched for service manifests
pub fn default_services_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("coordconf").join("services"))
}

/// Locate the application's configurations implementation
///
/// Resolution order:
/// 1. If `COORDCONF_SERVICES_DIR` is set, the manifest in that directory
///    must exist and names the implementation.
/// 2. Otherwise a manifest in [`default_services_dir`] is used if present.
/// 3. Otherwise the first implementation in the global registry.
pub fn new_instance() -> ConfigResult<Arc<dyn Configurations>> {
    if let Some(dir) = std::env::var_os(SERVICES_DIR_ENV_VAR) {
        return new_instance_from(PathBuf::from(dir));
    }

    let default_manifest = default_services_dir()
        .map(|dir| dir.join(CONFIGURATIONS_CONTRACT))
        .filter(|path| path.is_file());
    match default_manifest {
        Some(path) => {
            let manifest = ServiceManifest::load_file(CONFIGURATIONS_CONTRACT, path)?;
            REGISTRY.locate_from_manifest(&manifest)
        }
        None => REGISTRY.locate(),
    }
}

/// Locate the implementation named by the manifest in `services_dir`
///
/// The manifest must exist; implementations come from the global registry.
pub fn new_instance_from(services_dir: impl AsRef<Path>) -> ConfigResult<Arc<dyn Configurations>> {
    let manifest = ServiceManifest::load(services_dir, CONFIGURATIONS_CONTRACT)?;
    REGISTRY.locate_from_manifest(&manifest)
}
