//! Fakes shared by the unit tests.

use crate::charts::{
    ChartDefinition,
    ChartUpdate,
    MetricsSink,
};
use eyre::{
    eyre,
    Result,
};
use multichain_collector_config::{
    NodeConfig,
    RawNodeConfig,
};
use multichain_collector_rpc::{
    RpcError,
    RpcRequest,
    RpcResponse,
    RpcTransport,
};
use serde_json::json;
use std::{
    collections::VecDeque,
    future::Future,
    pin::Pin,
    sync::Mutex,
};

pub(crate) fn node(name: &str) -> NodeConfig {
    raw_node(name).resolve(5).unwrap()
}

pub(crate) fn raw_node(name: &str) -> RawNodeConfig {
    RawNodeConfig {
        name: Some(name.to_string()),
        hostname: Some("h".to_string()),
        port: Some(1),
        username: Some("u".to_string()),
        password: Some("p".to_string()),
        chain: Some("c".to_string()),
        path: Some("/".to_string()),
        update_every: None,
        scheme: None,
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    pub registered: Vec<String>,
    pub submitted: Vec<ChartUpdate>,
    pub disabled: bool,
    /// Number of upcoming registrations to refuse.
    pub fail_registrations: usize,
}

impl MetricsSink for RecordingSink {
    fn register_chart(&mut self, chart: &ChartDefinition) -> Result<()> {
        if self.fail_registrations > 0 {
            self.fail_registrations -= 1;
            return Err(eyre!("refusing {}", chart.id));
        }
        self.registered.push(chart.id.clone());
        Ok(())
    }

    fn submit(&mut self, update: &ChartUpdate) -> Result<()> {
        self.submitted.push(update.clone());
        Ok(())
    }

    fn disable(&mut self) -> Result<()> {
        self.disabled = true;
        Ok(())
    }
}

/// Answers requests with canned bodies in order. Once exhausted every call fails with HTTP 503.
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<serde_json::Value, RpcError>>>,
    requests: Mutex<Vec<RpcRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: impl IntoIterator<Item = Result<serde_json::Value, RpcError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The three answers of a node with one subscribed stream.
    pub fn healthy() -> Self {
        Self::new([
            Ok(json!({ "result": { "blocks": 100, "connections": 5 }, "error": null, "id": 1 })),
            Ok(json!({ "result": { "size": 2, "bytes": 512 }, "error": null, "id": 2 })),
            Ok(json!({
                "result": [{ "name": "s1", "subscribed": true, "items": 10, "confirmed": 7, "keys": 3 }],
                "error": null,
                "id": 3
            })),
        ])
    }

    pub fn requests(&self) -> Vec<RpcRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl RpcTransport for ScriptedTransport {
    fn call(&self, request: RpcRequest) -> Pin<Box<dyn Future<Output = Result<RpcResponse, RpcError>> + Send + '_>> {
        self.requests.lock().unwrap().push(request);
        let next = self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(RpcError::Status {
                code: 503,
                message: "Service Unavailable".to_string(),
            })
        });
        Box::pin(async move { next.map(RpcResponse::ok) })
    }
}
