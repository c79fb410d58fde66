use crate::{
    Method,
    RpcError,
};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct RpcResponse {
    pub status_code: u16,
    pub status_message: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl RpcResponse {
    /// A successful response carrying `body`, mostly useful for transports that are not HTTP.
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status_code: 200,
            status_message: "OK".to_string(),
            headers: HeaderMap::new(),
            body,
        }
    }

    /// Extracts `body.result` as `T`. A non-null `body.error` wins over any result.
    pub fn into_result<T: DeserializeOwned>(self, method: Method) -> Result<T, RpcError> {
        let serde_json::Value::Object(mut body) = self.body else {
            return Err(RpcError::MissingResult(method));
        };

        match body.remove("error") {
            None | Some(serde_json::Value::Null) => {}
            Some(error) => {
                return Err(RpcError::Rpc {
                    code: error.get("code").and_then(serde_json::Value::as_i64).unwrap_or_default(),
                    message: error
                        .get("message")
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| error.to_string()),
                })
            }
        }

        match body.remove("result") {
            None | Some(serde_json::Value::Null) => Err(RpcError::MissingResult(method)),
            Some(result) => serde_json::from_value(result).map_err(|source| RpcError::Decode { method, source }),
        }
    }
}
