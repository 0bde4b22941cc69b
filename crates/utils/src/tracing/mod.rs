use amalfi_core::constants::{AMALFI_LOG_VAR, DEFAULT_LOG_FILTER};
use amalfi_core::{Error, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing system
///
/// Filter directives are read from `AMALFI_LOG` and fall back to `info`.
/// Events go to stderr; ANSI colors are only used on a terminal.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_env(AMALFI_LOG_VAR)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .map_err(|e| Error::configuration(format!("invalid log filter: {e}")))?;
    install(filter)
}

/// Initialize the tracing system with explicit filter directives,
/// ignoring `AMALFI_LOG`.
pub fn init_with_filter(directives: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directives)
        .map_err(|e| Error::configuration(format!("invalid log filter {directives:?}: {e}")))?;
    install(filter)
}

fn install(filter: EnvFilter) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::configuration(format!("failed to install tracing subscriber: {e}")))
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_directives() {
        let err = init_with_filter("amalfi=[").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_second_init_fails() {
        // only one global subscriber can be installed
        let _ = init_with_filter("debug");
        assert!(init_with_filter("debug").is_err());
    }
}
