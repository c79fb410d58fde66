//! # MultiChain JSON-RPC client
//!
//! A minimal client for the node RPC calls the stats collector needs.
//!
//! - **`RpcTransport`**: one request in, one response out. `HttpRpcClient` implements it over HTTP(S)
//!   with basic auth; tests and other frontends can plug in their own.
//! - **`RpcRequest`** / **`RpcResponse`**: the wire envelope (`jsonrpc: "1.0"`, `chain_name`, `params: []`)
//!   and the parsed reply, with `into_result` to pull a typed `result` out of it.
//! - **`NodeInfo`**, **`MempoolInfo`**, **`StreamEntry`**: the subset of `getinfo`, `getmempoolinfo` and
//!   `liststreams` results that gets charted.
//!
//! There are no retries: every failure is returned to the caller as an `RpcError`.

#[macro_use]
extern crate tracing;

mod client;
mod error;
mod request;
mod response;
mod types;

pub use client::{
    ConnectionOptions,
    HttpRpcClient,
    RpcTransport,
    DEFAULT_TIMEOUT,
};
pub use error::RpcError;
pub use request::{
    Method,
    RpcRequest,
    JSONRPC_VERSION,
};
pub use response::RpcResponse;
pub use types::{
    MempoolInfo,
    NodeInfo,
    StreamEntry,
};
