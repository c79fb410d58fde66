use color_eyre::Result;
use std::io::IsTerminal as _;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
};

/// Logs go to stderr, stdout belongs to the plugin protocol. `RUST_LOG` overrides the default level.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_filter(filter),
        )
        .with(tracing_error::ErrorLayer::default())
        .try_init()?;
    Ok(())
}
