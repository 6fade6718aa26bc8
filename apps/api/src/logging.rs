use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialises structured logging. A `RUST_LOG` filter directive wins; otherwise
/// `rust_log` is applied as the level for this library and the calling binary.
pub fn init_tracing(bin: &str, rust_log: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={rust_log},{bin}={rust_log},tower_http={rust_log}",
                env!("CARGO_CRATE_NAME")
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
