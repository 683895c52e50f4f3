use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the registrygen CLI
///
/// Logs go to stderr so stdout stays free for tooling. The level can be
/// controlled via the RUST_LOG environment variable, which wins over the
/// `verbose` flag:
/// - RUST_LOG=debug registrygen ./src/registry  (verbose logging)
/// - RUST_LOG=warn registrygen ./src/registry   (warnings only)
pub fn init(verbose: bool) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "registrygen=debug,registrygen_core=debug"
    } else {
        "registrygen=info,registrygen_core=info"
    }
}
