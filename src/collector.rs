use multichain_collector_config::NodeConfig;
use multichain_collector_rpc::{
    MempoolInfo,
    Method,
    NodeInfo,
    RpcError,
    RpcRequest,
    RpcTransport,
    StreamEntry,
};
use serde::de::DeserializeOwned;
use std::sync::{
    atomic::{
        AtomicU64,
        Ordering,
    },
    Arc,
};

#[derive(thiserror::Error, Debug)]
pub enum CollectError {
    #[error("`{method}` failed: {source}")]
    Rpc {
        method: Method,
        #[source]
        source: RpcError,
    },
    #[error("node stats are missing `{0}`")]
    Validation(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamStat {
    pub name: String,
    pub subscribed: bool,
    pub items: i64,
    pub confirmed: i64,
    pub keys: i64,
}

impl From<StreamEntry> for StreamStat {
    fn from(entry: StreamEntry) -> Self {
        Self {
            name: entry.name,
            subscribed: entry.subscribed,
            items: entry.items,
            confirmed: entry.confirmed,
            keys: entry.keys,
        }
    }
}

/// The stats of one node for one collection cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub blocks: i64,
    pub connections: i64,
    /// Transactions in the mempool.
    pub mem_size: Option<i64>,
    /// Bytes used by the mempool.
    pub mem_bytes: Option<i64>,
    pub streams: Vec<StreamStat>,
}

/// Accumulates the results of the RPC calls of one cycle.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    blocks: Option<i64>,
    connections: Option<i64>,
    mem_size: Option<i64>,
    mem_bytes: Option<i64>,
    streams: Vec<StreamStat>,
}

impl SnapshotBuilder {
    pub fn info(mut self, info: NodeInfo) -> Self {
        self.blocks = info.blocks;
        self.connections = info.connections;
        self
    }

    pub fn mempool(mut self, mempool: MempoolInfo) -> Self {
        self.mem_size = mempool.size;
        self.mem_bytes = mempool.bytes;
        self
    }

    pub fn streams(mut self, streams: Vec<StreamEntry>) -> Self {
        self.streams = streams.into_iter().map(StreamStat::from).collect();
        self
    }

    /// Fails unless both `blocks` and `connections` were reported.
    pub fn build(self) -> Result<Snapshot, CollectError> {
        Ok(Snapshot {
            blocks: self.blocks.ok_or(CollectError::Validation("blocks"))?,
            connections: self.connections.ok_or(CollectError::Validation("connections"))?,
            mem_size: self.mem_size,
            mem_bytes: self.mem_bytes,
            streams: self.streams,
        })
    }
}

/// Collects the stats of a single node.
pub struct Collector {
    node: NodeConfig,
    transport: Arc<dyn RpcTransport>,
    next_id: AtomicU64,
}

impl Collector {
    pub fn new(node: NodeConfig, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            node,
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn node(&self) -> &NodeConfig {
        &self.node
    }

    async fn request<T: DeserializeOwned>(&self, method: Method) -> Result<T, CollectError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(method, self.node.chain.clone(), id);
        self.transport
            .call(request)
            .await
            .and_then(|response| response.into_result(method))
            .map_err(|source| CollectError::Rpc { method, source })
    }

    /// Runs `getinfo`, `getmempoolinfo` and `liststreams` one after the other. The first failure ends the
    /// cycle and whatever was gathered so far is dropped.
    #[instrument(level = "debug", skip(self), fields(node = %self.node.name))]
    pub async fn collect(&self) -> Result<Snapshot, CollectError> {
        let builder = SnapshotBuilder::default().info(self.request(Method::GetInfo).await?);
        let builder = builder.mempool(self.request(Method::GetMempoolInfo).await?);
        let builder = builder.streams(self.request(Method::ListStreams).await?);
        let snapshot = builder.build()?;

        debug!(
            blocks = snapshot.blocks,
            connections = snapshot.connections,
            streams = snapshot.streams.len(),
            "Snapshot collected"
        );
        Ok(snapshot)
    }

    /// Like [`Collector::collect`], but logs the failure and returns `None` so the cycle is skipped.
    pub async fn collect_or_skip(&self) -> Option<Snapshot> {
        match self.collect().await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(node = %self.node.name, "Skipping collection cycle: {err}");
                None
            }
        }
    }
}
