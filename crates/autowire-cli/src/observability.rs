//! Logging for the CLI.
//!
//! Diagnostics go to stderr; stdout is reserved for command output. The
//! filter starts at a fixed level and is replaced once the configuration
//! file has been read, unless `RUST_LOG` pins it.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

/// Adjusts the installed log filter after startup.
pub struct LogControl {
    handle: reload::Handle<EnvFilter, Registry>,
    pinned: bool,
}

impl LogControl {
    /// Switches to `level`, an `EnvFilter` directive such as `info` or
    /// `autowire_graphql=debug`. No-op while `RUST_LOG` is in effect.
    pub fn set_level(&self, level: &str) -> Result<()> {
        if self.pinned {
            return Ok(());
        }
        let filter =
            EnvFilter::try_new(level).with_context(|| format!("invalid logging.level `{level}`"))?;
        self.handle
            .reload(filter)
            .context("log filter is no longer installed")
    }
}

/// Installs the global subscriber, filtered by `RUST_LOG` when it parses and
/// by `default_level` otherwise.
pub fn init_tracing(default_level: &str) -> LogControl {
    let from_env = EnvFilter::try_from_default_env().ok();
    let pinned = from_env.is_some();
    let (filter, handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new(default_level)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
    if let Err(e) = installed {
        eprintln!("Warning: logging already initialised: {e}");
    }

    LogControl { handle, pinned }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control(pinned: bool) -> (reload::Layer<EnvFilter, Registry>, LogControl) {
        let (layer, handle) = reload::Layer::new(EnvFilter::new("warn"));
        (layer, LogControl { handle, pinned })
    }

    fn current(control: &LogControl) -> String {
        control.handle.with_current(ToString::to_string).unwrap()
    }

    #[test]
    fn test_set_level_replaces_filter() {
        let (_layer, control) = control(false);
        control.set_level("debug").unwrap();
        assert!(current(&control).contains("debug"));
    }

    #[test]
    fn test_pinned_filter_is_kept() {
        let (_layer, control) = control(true);
        control.set_level("trace").unwrap();
        assert!(current(&control).contains("warn"));
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let (_layer, control) = control(false);
        let err = control.set_level("widgets=loud").unwrap_err();
        assert!(err.to_string().contains("widgets=loud"));
        assert!(current(&control).contains("warn"));
    }
}
