use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Install the stderr subscriber. `RUST_LOG` wins over the CLI verbosity.
pub fn init(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string())),
        )
        .with_writer(std::io::stderr)
        .init();
}
