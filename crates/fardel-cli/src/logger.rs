//! Logging setup on the `tracing` ecosystem.
//!
//! Verbosity is driven by the global CLI flags, with `RUST_LOG` respected
//! when neither flag is set.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Call once at program start. Levels resolve in this order:
/// `--verbose` (debug for fardel crates), `--quiet` (errors only),
/// `RUST_LOG`, then the info-level default.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("fardel_ast=debug,fardel_graph=debug,fardel_bundler=debug,fardel_cli=debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("fardel_graph=info,fardel_bundler=info,fardel_cli=info")
        })
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second init (tests, embedding) is fine to ignore.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
