use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "HOUSEMARKS_LOG";

pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    }
}

/// Logs go to stderr so rendered reports on stdout stay clean.
pub fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(format!("housemarks={}", level_for(verbose, quiet))));

    // a second init (tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init();
}
