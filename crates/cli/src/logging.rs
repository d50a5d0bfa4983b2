// ABOUTME: Installs the stderr tracing subscriber for the binary.
// ABOUTME: RUST_LOG wins when set; otherwise the settings file's logging level is used.

use tracing_subscriber::EnvFilter;

/// Map a settings log level name to a tracing filter directive.
///
/// Unknown names fall back to `info`.
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_uppercase().as_str() {
        "TRACE" => "trace",
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" | "WARN" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "info",
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_directive(level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("warning"), "warn");
        assert_eq!(level_directive(" Error "), "error");
        assert_eq!(level_directive("verbose"), "info");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logging("INFO");
        init_logging("DEBUG");
    }
}
