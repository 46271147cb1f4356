//! Logger trait definition

use std::sync::Arc;

/// Logger abstraction used by configuration providers
///
/// Implementations:
/// - `TracingLogger`: Forwards to the `tracing` crate (the default)
/// - `NoOpLogger`: Discards everything, for silencing a provider
pub trait Logger: Send + Sync {
    /// Log a debug message
    fn debug(&self, message: &str);

    /// Log an info message
    fn info(&self, message: &str);

    /// Log a warning message
    fn warn(&self, message: &str);

    /// Log an error message
    fn error(&self, message: &str);
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

/// Convenience macros for logging
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(&format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingLogger {
        lines: Mutex<Vec<String>>,
    }

    impl Logger for RecordingLogger {
        fn debug(&self, message: &str) {
            self.lines.lock().push(format!("debug {}", message));
        }
        fn info(&self, message: &str) {
            self.lines.lock().push(format!("info {}", message));
        }
        fn warn(&self, message: &str) {
            self.lines.lock().push(format!("warn {}", message));
        }
        fn error(&self, message: &str) {
            self.lines.lock().push(format!("error {}", message));
        }
    }

    #[test]
    fn test_macros_format_and_dispatch() {
        let logger = RecordingLogger::default();
        crate::log_debug!(logger, "resolving {}", "db.url");
        crate::log_warn!(logger, "{} candidates", 2);

        let shared: SharedLogger = Arc::new(RecordingLogger::default());
        crate::log_error!(shared, "failed");

        assert_eq!(
            *logger.lines.lock(),
            vec!["debug resolving db.url".to_string(), "warn 2 candidates".to_string()]
        );
    }
}
