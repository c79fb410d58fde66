use clap::Parser;
use color_eyre::Result;
use multichain_collector_config::{
    Args,
    Config,
};
use multichain_stats_collector::{
    init_errors,
    init_logging,
    Orchestrator,
    PluginProtocolSink,
};
use tokio_util::sync::CancellationToken;
use tracing::{
    error,
    info,
    warn,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_errors()?;
    let args = Args::parse();
    init_logging(args.verbose)?;

    let once = args.once;
    let config = Config::new(args)?;

    let mut orchestrator =
        Orchestrator::new(PluginProtocolSink::stdout()).with_timeout(config.request_timeout());
    let registered = orchestrator.configure(&config);
    if registered == 0 {
        warn!("No usable server configured, disabling the collector");
        return orchestrator.disable().await;
    }
    info!(registered, update_every = config.update_every, "Starting MultiChain stats collector");

    if once {
        let published = orchestrator.run_once().await;
        info!(published, registered, "Single collection cycle finished");
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!("Unable to listen for Ctrl-C, running until killed: {err}");
                return;
            }
            info!("Received Ctrl-C, shutting down");
            shutdown.cancel();
        }
    });

    orchestrator.run(shutdown).await
}
