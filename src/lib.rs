//! # MultiChain Stats Collector
//!
//! An external plugin for the monitoring agent that polls MultiChain nodes over JSON-RPC and republishes
//! their stats as charts.
//!
//! ## Architecture
//!
//! - **`collector`**: `Collector` runs `getinfo`, `getmempoolinfo` and `liststreams` against one node and
//!   builds a `Snapshot`, or nothing at all when a step fails
//! - **`charts`**: the chart table, the memoizing `ChartRegistry`, the snapshot to chart mapping and the
//!   `MetricsSink` speaking the agent's plugin protocol
//! - **`orchestrator`**: validates the configured servers and runs one job per node on its own interval
//!
//! Configuration lives in the `multichain-collector-config` crate and the RPC client in
//! `multichain-collector-rpc`.

#[macro_use]
extern crate tracing;

pub mod charts;
pub mod collector;
mod errors;
mod logging;
pub mod orchestrator;
#[cfg(test)]
mod testing;

pub use charts::{
    ChartRegistry,
    MetricsSink,
    PluginProtocolSink,
};
pub use collector::{
    CollectError,
    Collector,
    Snapshot,
};
pub use errors::init_errors;
pub use logging::init_logging;
pub use orchestrator::Orchestrator;
