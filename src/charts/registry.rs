use crate::{
    charts::{
        map_to_charts,
        ChartDefinition,
        ChartKind,
        ChartUpdate,
        MetricsSink,
    },
    collector::Snapshot,
};
use eyre::{
    eyre,
    Result,
};
use multichain_collector_config::NodeConfig;
use std::{
    collections::HashMap,
    sync::Arc,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartKey {
    pub node: String,
    pub kind: ChartKind,
    pub stream: Option<String>,
}

/// Creates every chart once, registers it with the sink and hands out the same definition afterwards.
pub struct ChartRegistry<S> {
    sink: S,
    charts: HashMap<ChartKey, Arc<ChartDefinition>>,
}

impl<S: MetricsSink> ChartRegistry<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            charts: HashMap::new(),
        }
    }

    /// Returns the cached chart for `(node, kind, stream)`, creating and registering it on first use.
    /// `stream` is required for per-stream kinds and ignored otherwise. A chart the sink refused is
    /// not cached, so the next cycle tries to register it again.
    pub fn get_or_create(
        &mut self,
        node: &NodeConfig,
        kind: ChartKind,
        stream: Option<&str>,
    ) -> Result<Arc<ChartDefinition>> {
        let stream = match (kind.is_per_stream(), stream) {
            (true, None) => return Err(eyre!("chart kind {kind} needs a stream name")),
            (true, stream) => stream,
            (false, _) => None,
        };

        let key = ChartKey {
            node: node.name.clone(),
            kind,
            stream: stream.map(str::to_string),
        };
        if let Some(chart) = self.charts.get(&key) {
            return Ok(chart.clone());
        }

        let chart = Arc::new(ChartDefinition::new(node, kind, stream));
        self.sink.register_chart(&chart)?;
        debug!(id = %chart.id, node = %node.name, "Chart registered");
        self.charts.insert(key, chart.clone());
        Ok(chart)
    }

    pub fn submit(&mut self, updates: &[ChartUpdate]) -> Result<()> {
        for update in updates {
            self.sink.submit(update)?;
        }
        Ok(())
    }

    /// Maps `snapshot` onto the node's charts and submits the values. Returns the number of charts updated.
    pub fn publish(&mut self, node: &NodeConfig, snapshot: &Snapshot) -> Result<usize> {
        let updates = map_to_charts(self, node, snapshot)?;
        self.submit(&updates)?;
        Ok(updates.len())
    }

    pub fn disable(&mut self) -> Result<()> {
        self.sink.disable()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
