//! Logger that discards every message

use std::sync::Arc;

use super::traits::{Logger, SharedLogger};

/// Discards everything it is given
///
/// Hand it to a provider to keep lookup chatter out of the `tracing` output,
/// e.g. `MemoryConfigurations::new().with_logger(NoOpLogger::shared())`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    /// A shareable handle for provider builders
    pub fn shared() -> SharedLogger {
        Arc::new(NoOpLogger)
    }
}

impl Logger for NoOpLogger {
    fn debug(&self, _: &str) {}
    fn info(&self, _: &str) {}
    fn warn(&self, _: &str) {}
    fn error(&self, _: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configurations::{ConfigurationsExt, MemoryConfigurations};
    use crate::types::Coordinates;

    #[test]
    fn test_silenced_provider_still_resolves() {
        let config = MemoryConfigurations::new()
            .with_logger(NoOpLogger::shared())
            .with_value("port", "8080")
            .with_scoped_value(Coordinates::new().with("environment", "prod"), "port", "443")
            .with_scoped_value(Coordinates::new().with("region", "eu"), "port", "444");
        let prod_eu = Coordinates::new()
            .with("environment", "prod")
            .with("region", "eu");

        assert_eq!(config.get_or::<u16>("admin.port", "9000").unwrap(), Some(9000));
        assert!(config.get_in::<u16>(Some(&prod_eu), "port").unwrap_err().is_ambiguous());
    }
}
