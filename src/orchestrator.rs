use crate::{
    charts::{
        ChartRegistry,
        MetricsSink,
    },
    collector::Collector,
};
use eyre::Result;
use futures::future::join_all;
use multichain_collector_config::{
    Config,
    NodeConfig,
};
use multichain_collector_rpc::{
    ConnectionOptions,
    HttpRpcClient,
    RpcTransport,
    DEFAULT_TIMEOUT,
};
use std::{
    sync::Arc,
    time::Duration,
};
use tokio::{
    sync::Mutex,
    time::{
        interval,
        MissedTickBehavior,
    },
};
use tokio_util::sync::CancellationToken;

/// The chart registry, shared by every node job. It is only locked once a snapshot is complete.
pub type SharedRegistry<S> = Arc<Mutex<ChartRegistry<S>>>;

/// Owns the chart registry and one collector per configured node, and drives them.
pub struct Orchestrator<S> {
    registry: SharedRegistry<S>,
    collectors: Vec<Arc<Collector>>,
    timeout: Duration,
}

impl<S: MetricsSink + 'static> Orchestrator<S> {
    pub fn new(sink: S) -> Self {
        Self {
            registry: Arc::new(Mutex::new(ChartRegistry::new(sink))),
            collectors: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Request timeout of the HTTP clients created by [`Orchestrator::configure`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Registers a job for every complete `servers` entry and returns how many were registered.
    /// Incomplete entries are logged and skipped.
    pub fn configure(&mut self, config: &Config) -> usize {
        if config.enable_autodetect {
            info!("enable_autodetect is set, but only the configured servers are collected");
        }
        if config.servers.is_none() {
            debug!("No servers configured");
            return 0;
        }

        let mut registered = 0;
        for (index, node) in config.nodes() {
            let node = match node {
                Ok(node) => node,
                Err(err) => {
                    warn!(index, "Skipping server entry: {err}");
                    continue;
                }
            };
            match self.http_transport(&node) {
                Ok(transport) => {
                    info!(node = %node.name, update_every = node.update_every, "Server registered");
                    self.register(node, transport);
                    registered += 1;
                }
                Err(err) => warn!(node = %node.name, "Skipping server: {err}"),
            }
        }
        registered
    }

    fn http_transport(&self, node: &NodeConfig) -> Result<Arc<dyn RpcTransport>> {
        let client = HttpRpcClient::new(ConnectionOptions {
            endpoint: node.endpoint()?,
            username: node.username.clone(),
            password: node.password.clone(),
            timeout: self.timeout,
        })?;
        Ok(Arc::new(client))
    }

    /// Registers a job for `node` that talks to it through `transport`.
    pub fn register(&mut self, node: NodeConfig, transport: Arc<dyn RpcTransport>) {
        self.collectors.push(Arc::new(Collector::new(node, transport)));
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    pub fn registry(&self) -> SharedRegistry<S> {
        self.registry.clone()
    }

    /// Tells the host that this collector has nothing to do.
    pub async fn disable(&self) -> Result<()> {
        self.registry.lock().await.disable()
    }

    /// Runs a single cycle for every node concurrently and returns how many of them published.
    pub async fn run_once(&self) -> usize {
        join_all(
            self.collectors
                .iter()
                .map(|collector| run_cycle(collector, &self.registry)),
        )
        .await
        .into_iter()
        .filter(|published| *published)
        .count()
    }

    /// Runs every node on its own interval until `shutdown` is cancelled. A cycle that is in flight when
    /// the token fires runs to completion.
    pub async fn run(self, shutdown: CancellationToken) -> Result<()> {
        let handles: Vec<_> = self
            .collectors
            .iter()
            .map(|collector| {
                tokio::spawn(schedule(
                    collector.clone(),
                    self.registry.clone(),
                    shutdown.clone(),
                ))
            })
            .collect();

        info!(nodes = handles.len(), "Collection started");
        for result in join_all(handles).await {
            result?;
        }
        info!("Collection stopped");
        Ok(())
    }
}

/// One collection cycle: collect, then map and submit under the registry lock. Failures are logged and
/// leave the node's charts untouched.
pub async fn run_cycle<S: MetricsSink>(collector: &Collector, registry: &Mutex<ChartRegistry<S>>) -> bool {
    let Some(snapshot) = collector.collect_or_skip().await else {
        return false;
    };

    let node = collector.node();
    match registry.lock().await.publish(node, &snapshot) {
        Ok(charts) => {
            debug!(node = %node.name, charts, "Charts updated");
            true
        }
        Err(err) => {
            error!(node = %node.name, "Publishing charts failed: {err:?}");
            false
        }
    }
}

async fn schedule<S: MetricsSink>(
    collector: Arc<Collector>,
    registry: SharedRegistry<S>,
    shutdown: CancellationToken,
) {
    let node = collector.node();
    // A cycle that overruns its interval swallows the ticks it missed, so cycles of one node never overlap
    let mut ticker = interval(Duration::from_secs(node.update_every));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    debug!(node = %node.name, update_every = node.update_every, "Node job started");
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                run_cycle(&collector, &registry).await;
            }
        }
    }
    debug!(node = %node.name, "Node job stopped");
}
