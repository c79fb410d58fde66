use serde::Serialize;
use strum::{
    Display,
    EnumString,
};

pub const JSONRPC_VERSION: &str = "1.0";

/// The node RPC methods the collector uses.
#[derive(Debug, Clone, Copy, Display, EnumString, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Method {
    GetInfo,
    GetMempoolInfo,
    ListStreams,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RpcRequest {
    pub method: Method,
    pub chain_name: String,
    pub id: u64,
    pub jsonrpc: &'static str,
    pub params: Vec<serde_json::Value>,
}

impl RpcRequest {
    /// A parameterless call against `chain_name`.
    pub fn new(method: Method, chain_name: impl Into<String>, id: u64) -> Self {
        Self {
            method,
            chain_name: chain_name.into(),
            id,
            jsonrpc: JSONRPC_VERSION,
            params: Vec::new(),
        }
    }
}
