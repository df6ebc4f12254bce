// Tracing setup for the `phatik` binary.
//
// Logs go to stderr so that `phatik list` output on stdout stays parseable.
// `PHATIK_LOG_LEVEL` takes any `EnvFilter` directive string and overrides the
// `--verbose` default.

use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

/// Environment variable holding the log filter directives
pub const LOG_LEVEL_ENV_VAR: &str = "PHATIK_LOG_LEVEL";

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,phatik=debug"
    } else {
        "warn"
    }
}

fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init();
}
