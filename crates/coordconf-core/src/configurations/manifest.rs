//! Service manifests naming the configurations implementation to use

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, ConfigResult};

/// A parsed service manifest
///
/// A manifest is a text file named after the contract it configures
/// (for example `coordconf.Configurations`). Each non-blank line names one
/// implementation; `#` starts a comment. The first implementation listed is
/// the one that gets instantiated.
///
/// ```text
/// # production provider
/// memory
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceManifest {
    contract: String,
    implementations: Vec<String>,
    path: Option<PathBuf>,
}

impl ServiceManifest {
    /// Parse manifest contents
    pub fn parse(contract: &str, contents: &str) -> ConfigResult<Self> {
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
        let mut implementations = Vec::new();

        for (index, line) in contents.lines().enumerate() {
            let identifier = line.split('#').next().unwrap_or_default().trim();
            if identifier.is_empty() {
                continue;
            }
            if identifier.chars().any(char::is_whitespace) {
                return Err(ConfigError::MalformedManifest {
                    contract: contract.to_string(),
                    line: index + 1,
                    reason: format!("'{}' is not a single identifier", identifier),
                });
            }
            implementations.push(identifier.to_string());
        }

        if implementations.is_empty() {
            return Err(ConfigError::MalformedManifest {
                contract: contract.to_string(),
                line: contents.lines().count(),
                reason: "no implementation listed".to_string(),
            });
        }

        Ok(Self {
            contract: contract.to_string(),
            implementations,
            path: None,
        })
    }

    /// Load the manifest for `contract` from a services directory
    pub fn load(services_dir: impl AsRef<Path>, contract: &str) -> ConfigResult<Self> {
        Self::load_file(contract, services_dir.as_ref().join(contract))
    }

    /// Load a manifest from an explicit file
    pub fn load_file(contract: &str, path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(source) => return Err(ConfigError::ManifestUnreadable { path, source }),
        };
        let mut manifest = Self::parse(contract, &contents)?;
        manifest.path = Some(path);
        Ok(manifest)
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// The implementation to instantiate
    pub fn implementation(&self) -> &str {
        &self.implementations[0]
    }

    /// Every implementation listed, in order
    pub fn implementations(&self) -> &[String] {
        &self.implementations
    }

    /// Where the manifest was loaded from, if it came from a file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
