use crate::{
    charts::{
        ChartDefinition,
        ChartKind,
        ChartRegistry,
        MetricsSink,
    },
    collector::Snapshot,
};
use eyre::Result;
use multichain_collector_config::NodeConfig;
use std::sync::Arc;

/// Values for one chart, in dimension order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartUpdate {
    pub chart: Arc<ChartDefinition>,
    pub values: Vec<(&'static str, i64)>,
}

impl ChartUpdate {
    /// Pairs `values` with the dimensions of the chart's kind. Missing values are left out, so the
    /// dimension shows a gap for this cycle.
    pub fn new(chart: Arc<ChartDefinition>, values: &[Option<i64>]) -> Self {
        let dimensions = chart.kind.dimensions();
        debug_assert_eq!(dimensions.len(), values.len(), "one value per dimension of {}", chart.kind);
        let values = dimensions
            .iter()
            .zip(values)
            .filter_map(|(dimension, value)| value.map(|value| (*dimension, value)))
            .collect();
        Self { chart, values }
    }

    pub fn value(&self, dimension: &str) -> Option<i64> {
        self.values
            .iter()
            .find(|(id, _)| *id == dimension)
            .map(|(_, value)| *value)
    }
}

/// Derives the chart updates of one collection cycle. Subscribed streams come first, in the order the node
/// listed them, followed by the node-wide charts.
pub fn map_to_charts<S: MetricsSink>(
    registry: &mut ChartRegistry<S>,
    node: &NodeConfig,
    snapshot: &Snapshot,
) -> Result<Vec<ChartUpdate>> {
    let mut updates = Vec::new();

    for stream in snapshot.streams.iter().filter(|stream| stream.subscribed) {
        let items = registry.get_or_create(node, ChartKind::StreamItems, Some(&stream.name))?;
        // Not clamped: a negative count means the node reported more confirmed than total items.
        updates.push(ChartUpdate::new(
            items,
            &[Some(stream.confirmed), Some(stream.items - stream.confirmed)],
        ));

        let keys = registry.get_or_create(node, ChartKind::StreamKeys, Some(&stream.name))?;
        updates.push(ChartUpdate::new(keys, &[Some(stream.keys)]));
    }

    let node_values = [
        (ChartKind::BlocksSize, snapshot.mem_size),
        (ChartKind::BlocksMemory, snapshot.mem_bytes),
        (ChartKind::Blocks, Some(snapshot.blocks)),
        (ChartKind::Connections, Some(snapshot.connections)),
    ];
    for (kind, value) in node_values {
        let chart = registry.get_or_create(node, kind, None)?;
        updates.push(ChartUpdate::new(chart, &[value]));
    }

    Ok(updates)
}
