//! Tracing initialization.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log filter used when nothing else is configured.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Events go to stderr so that model output
/// on stdout stays clean.
///
/// The filter is taken from `directive` (the `--log-level` flag) if given,
/// then `RUST_LOG`, then `fallback` (the manifest's `[logging] level`),
/// then [`DEFAULT_FILTER`].
pub fn init_tracing(directive: Option<&str>, fallback: Option<&str>) -> anyhow::Result<()> {
    let env_filter = create_env_filter(directive, fallback)?;
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    Ok(())
}

fn create_env_filter(directive: Option<&str>, fallback: Option<&str>) -> anyhow::Result<EnvFilter> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive),
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback.unwrap_or(DEFAULT_FILTER))),
    };
    filter.map_err(|e| anyhow::anyhow!("invalid log filter: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directive_wins() {
        let filter = create_env_filter(Some("desyde_flatten=trace"), Some("warn")).unwrap();
        assert!(filter.to_string().contains("desyde_flatten=trace"));
    }

    #[test]
    fn malformed_directive_is_rejected() {
        assert!(create_env_filter(Some("desyde_flatten=verbose"), None).is_err());
    }
}
