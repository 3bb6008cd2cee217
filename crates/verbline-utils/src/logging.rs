//! Logging setup for the verbline binary
//!
//! Library crates only emit `tracing` events; the subscriber is installed once
//! by the CLI through [`init_tracing`].

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, verbose mode logs verbline crates
/// at `debug` and everything else at `info`; the default logs verbline at
/// `info` and everything else at `warn`. Output goes to stderr so that stdout
/// carries only command output.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("verbline=debug,info")
            } else {
                EnvFilter::try_new("verbline=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .compact();

    if verbose {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.with_target(true).with_span_events(FmtSpan::CLOSE))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.with_target(false))
            .try_init()?;
    }

    Ok(())
}
