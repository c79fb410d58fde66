use crate::{
    RpcError,
    RpcRequest,
    RpcResponse,
};
use std::{
    future::Future,
    pin::Pin,
    time::Duration,
};
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Something that can answer a single JSON-RPC request.
pub trait RpcTransport: Send + Sync {
    fn call(&self, request: RpcRequest) -> Pin<Box<dyn Future<Output = Result<RpcResponse, RpcError>> + Send + '_>>;
}

#[derive(Clone)]
pub struct ConnectionOptions {
    pub endpoint: Url,
    pub username: String,
    pub password: String,
    /// Upper bound for one request, enforced by the HTTP client.
    pub timeout: Duration,
}

impl std::fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("endpoint", &self.endpoint.as_str())
            .field("username", &self.username)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// JSON-RPC over HTTP(S) with basic auth.
#[derive(Debug, Clone)]
pub struct HttpRpcClient {
    options: ConnectionOptions,
    http_client: reqwest::Client,
}

impl HttpRpcClient {
    pub fn new(options: ConnectionOptions) -> Result<Self, RpcError> {
        let http_client = reqwest::Client::builder().timeout(options.timeout).build()?;
        Ok(Self { options, http_client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.options.endpoint
    }

    async fn send(&self, request: RpcRequest) -> Result<RpcResponse, RpcError> {
        trace!(method = %request.method, id = request.id, endpoint = %self.options.endpoint, "Sending RPC request");

        let response = self
            .http_client
            .post(self.options.endpoint.clone())
            .basic_auth(&self.options.username, Some(&self.options.password))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Status {
                code: status.as_u16(),
                message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let headers = response.headers().clone();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).map_err(RpcError::Parse)?;

        debug!(method = %request.method, id = request.id, status = status.as_u16(), "RPC response received");

        Ok(RpcResponse {
            status_code: status.as_u16(),
            status_message: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

impl RpcTransport for HttpRpcClient {
    fn call(&self, request: RpcRequest) -> Pin<Box<dyn Future<Output = Result<RpcResponse, RpcError>> + Send + '_>> {
        Box::pin(self.send(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Method,
        NodeInfo,
    };
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard) -> HttpRpcClient {
        HttpRpcClient::new(ConnectionOptions {
            endpoint: Url::parse(&server.url()).unwrap().join("/rpc").unwrap(),
            username: "user".to_string(),
            password: "pass".to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn posts_json_with_basic_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rpc")
            .match_header("content-type", "application/json")
            .match_header("authorization", "Basic dXNlcjpwYXNz")
            .match_body(Matcher::Json(json!({
                "method": "getinfo",
                "chain_name": "chain1",
                "id": 1,
                "jsonrpc": "1.0",
                "params": [],
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result":{"blocks":100,"connections":5},"error":null,"id":1}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let response = client
            .call(RpcRequest::new(Method::GetInfo, "chain1", 1))
            .await
            .unwrap();
        mock.assert_async().await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.status_message, "OK");
        let info: NodeInfo = response.into_result(Method::GetInfo).unwrap();
        assert_eq!(info.blocks, Some(100));
        assert_eq!(info.connections, Some(5));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/rpc")
            .with_status(401)
            .create_async()
            .await;

        let err = client_for(&server)
            .call(RpcRequest::new(Method::GetInfo, "chain1", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::Status { code: 401, .. }));
    }

    #[tokio::test]
    async fn invalid_json_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/rpc")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = client_for(&server)
            .call(RpcRequest::new(Method::ListStreams, "chain1", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::Parse(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let client = HttpRpcClient::new(ConnectionOptions {
            endpoint: Url::parse("http://127.0.0.1:1/").unwrap(),
            username: "user".to_string(),
            password: "pass".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let err = client
            .call(RpcRequest::new(Method::GetInfo, "chain1", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::Transport(_)));
    }

    #[test]
    fn debug_hides_password() {
        let options = ConnectionOptions {
            endpoint: Url::parse("http://127.0.0.1:8570/").unwrap(),
            username: "user".to_string(),
            password: "hunter2".to_string(),
            timeout: DEFAULT_TIMEOUT,
        };
        assert!(!format!("{options:?}").contains("hunter2"));
    }
}
