use crate::Method;

#[derive(thiserror::Error, Debug)]
pub enum RpcError {
    #[error("request could not be sent: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("node answered with HTTP {code} {message}")]
    Status { code: u16, message: String },
    #[error("response body is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("node returned RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("response to `{0}` carries no result")]
    MissingResult(Method),
    #[error("result of `{method}` has an unexpected shape: {source}")]
    Decode {
        method: Method,
        #[source]
        source: serde_json::Error,
    },
}
