//! Global `tracing` subscriber setup

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`RUST_LOG` syntax)
pub const LOG_ENV_VAR: &str = "COORDCONF_LOG";

/// Build an `EnvFilter` from `COORDCONF_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var(LOG_ENV_VAR) {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install a stderr fmt subscriber for the whole process
///
/// Does nothing when neither `COORDCONF_LOG` nor `RUST_LOG` is set. Returns
/// `false` when no subscriber was installed, including when another global
/// subscriber already exists.
pub fn init_tracing() -> bool {
    let requested = std::env::var(LOG_ENV_VAR).is_ok() || std::env::var("RUST_LOG").is_ok();
    if !requested {
        return false;
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
