use serde::{
    Deserialize,
    Serialize,
};

/// The part of the `getinfo` result the collector charts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeInfo {
    #[serde(default)]
    pub blocks: Option<i64>,
    #[serde(default)]
    pub connections: Option<i64>,
}

/// The part of the `getmempoolinfo` result the collector charts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MempoolInfo {
    /// Number of transactions waiting in the mempool.
    #[serde(default)]
    pub size: Option<i64>,
    /// Memory the mempool occupies, in bytes.
    #[serde(default)]
    pub bytes: Option<i64>,
}

/// One entry of the `liststreams` result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamEntry {
    pub name: String,
    #[serde(default)]
    pub subscribed: bool,
    #[serde(default)]
    pub items: i64,
    #[serde(default)]
    pub confirmed: i64,
    #[serde(default)]
    pub keys: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn liststreams_entry_ignores_unknown_fields() {
        let entries: Vec<StreamEntry> = serde_json::from_value(json!([
            {
                "name": "root",
                "createtxid": "abc",
                "streamref": "0-0-0",
                "open": true,
                "subscribed": true,
                "synchronized": true,
                "items": 10,
                "confirmed": 7,
                "keys": 3,
                "publishers": 1
            },
            { "name": "unsubscribed" }
        ]))
        .unwrap();

        assert_eq!(
            entries,
            vec![
                StreamEntry {
                    name: "root".to_string(),
                    subscribed: true,
                    items: 10,
                    confirmed: 7,
                    keys: 3,
                },
                StreamEntry {
                    name: "unsubscribed".to_string(),
                    ..StreamEntry::default()
                },
            ]
        );
    }
}
