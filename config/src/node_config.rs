use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;
use strum::{
    Display,
    EnumString,
};
use url::Url;

#[derive(Debug, Default, Clone, Copy, Display, EnumString, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeConfigError {
    #[error("server entry is missing the mandatory field `{0}`")]
    MissingField(&'static str),
}

/// A `servers` entry exactly as found in the configuration. Every field is optional here so that one
/// incomplete entry can be skipped without rejecting the whole file.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RawNodeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_every: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<Scheme>,
}

impl RawNodeConfig {
    /// Validates the entry, filling `update_every` from the global interval when it is absent.
    /// Empty strings and a zero port count as missing.
    pub fn resolve(&self, default_update_every: u64) -> Result<NodeConfig, NodeConfigError> {
        fn required(value: &Option<String>, field: &'static str) -> Result<String, NodeConfigError> {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(NodeConfigError::MissingField(field))
        }

        Ok(NodeConfig {
            name: required(&self.name, "name")?,
            hostname: required(&self.hostname, "hostname")?,
            port: self
                .port
                .filter(|p| *p != 0)
                .ok_or(NodeConfigError::MissingField("port"))?,
            username: required(&self.username, "username")?,
            password: required(&self.password, "password")?,
            chain: required(&self.chain, "chain")?,
            path: required(&self.path, "path")?,
            update_every: self.update_every.unwrap_or(default_update_every).max(1),
            scheme: self.scheme.unwrap_or_default(),
        })
    }
}

/// A validated node to collect from.
#[derive(Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub name: String,
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub chain: String,
    pub path: String,
    /// Collection interval in seconds, never zero.
    pub update_every: u64,
    pub scheme: Scheme,
}

impl NodeConfig {
    /// The JSON-RPC endpoint, `scheme://hostname:port` joined with `path`.
    pub fn endpoint(&self) -> Result<Url, url::ParseError> {
        let base = Url::parse(&format!("{}://{}:{}", self.scheme, self.hostname, self.port))?;
        base.join(&self.path)
    }
}

impl fmt::Debug for NodeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Avoid leaking the password into logs
        f.debug_struct("NodeConfig")
            .field("name", &self.name)
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("chain", &self.chain)
            .field("path", &self.path)
            .field("update_every", &self.update_every)
            .field("scheme", &self.scheme)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete() -> RawNodeConfig {
        RawNodeConfig {
            name: Some("n1".to_string()),
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

    #[test]
    fn resolve_defaults_interval_and_scheme() {
        let node = complete().resolve(5).unwrap();
        assert_eq!(node.update_every, 5);
        assert_eq!(node.scheme, Scheme::Http);
        assert_eq!(node.endpoint().unwrap().as_str(), "http://h:1/");
    }

    #[test]
    fn resolve_keeps_own_interval() {
        let raw = RawNodeConfig {
            update_every: Some(30),
            scheme: Some(Scheme::Https),
            path: Some("/rpc".to_string()),
            ..complete()
        };
        let node = raw.resolve(5).unwrap();
        assert_eq!(node.update_every, 30);
        assert_eq!(node.endpoint().unwrap().as_str(), "https://h:1/rpc");
    }

    #[test]
    fn resolve_rejects_missing_fields() {
        let cases: [(&str, RawNodeConfig); 8] = [
            ("name", RawNodeConfig { name: None, ..complete() }),
            ("hostname", RawNodeConfig { hostname: None, ..complete() }),
            ("port", RawNodeConfig { port: None, ..complete() }),
            ("port", RawNodeConfig { port: Some(0), ..complete() }),
            ("username", RawNodeConfig { username: Some(String::new()), ..complete() }),
            ("password", RawNodeConfig { password: None, ..complete() }),
            ("chain", RawNodeConfig { chain: None, ..complete() }),
            ("path", RawNodeConfig { path: None, ..complete() }),
        ];
        for (field, raw) in cases {
            assert_eq!(raw.resolve(5), Err(NodeConfigError::MissingField(field)));
        }
    }

    #[test]
    fn debug_hides_password() {
        let node = RawNodeConfig {
            password: Some("hunter2".to_string()),
            ..complete()
        }
        .resolve(5)
        .unwrap();
        assert!(!format!("{node:?}").contains("hunter2"));
    }
}
