//! # Charts
//!
//! Turns collected snapshots into chart definitions and samples for the monitoring agent.
//!
//! - **`ChartKind`**: the static table of charts per node, with their dimensions
//! - **`ChartRegistry`**: memoizes chart definitions per node/kind/stream and registers them with the sink once
//! - **`map_to_charts`**: derives the values of one cycle, including `unconfirmed = items - confirmed`
//! - **`MetricsSink`**: where definitions and samples go, `PluginProtocolSink` writes the agent's text protocol

mod chart;
mod mapper;
mod registry;
mod sink;

pub use chart::{
    Algorithm,
    ChartDefinition,
    ChartKind,
    ChartType,
    Dimension,
    BASE_PRIORITY,
    CHART_TYPE_PREFIX,
};
pub use mapper::{
    map_to_charts,
    ChartUpdate,
};
pub use registry::{
    ChartKey,
    ChartRegistry,
};
pub use sink::{
    MetricsSink,
    PluginProtocolSink,
};
