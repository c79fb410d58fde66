use multichain_collector_config::NodeConfig;
use strum::{
    Display,
    EnumIter,
};

/// Priority of the first chart of a node; every kind adds its own offset.
pub const BASE_PRIORITY: u32 = 60000;

/// Prefix of the chart type, the part of a chart id before the dot.
pub const CHART_TYPE_PREFIX: &str = "multichain";

#[derive(Debug, Clone, Copy, Display, EnumIter, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum ChartKind {
    StreamItems,
    StreamKeys,
    BlocksSize,
    BlocksMemory,
    Blocks,
    Connections,
}

impl ChartKind {
    /// Dimension ids in the order the values of an update are given.
    pub const fn dimensions(self) -> &'static [&'static str] {
        match self {
            ChartKind::StreamItems => &["confirmed", "unconfirmed"],
            ChartKind::StreamKeys => &["keys"],
            ChartKind::BlocksSize => &["size"],
            ChartKind::BlocksMemory => &["memory"],
            ChartKind::Blocks => &["blocks"],
            ChartKind::Connections => &["connections"],
        }
    }

    pub const fn is_per_stream(self) -> bool {
        matches!(self, ChartKind::StreamItems | ChartKind::StreamKeys)
    }

    pub const fn units(self) -> &'static str {
        match self {
            ChartKind::StreamItems => "items",
            ChartKind::StreamKeys => "keys",
            ChartKind::BlocksSize => "transactions",
            ChartKind::BlocksMemory => "bytes",
            ChartKind::Blocks => "blocks",
            ChartKind::Connections => "connections",
        }
    }

    pub const fn family(self) -> &'static str {
        match self {
            ChartKind::StreamItems | ChartKind::StreamKeys => "streams",
            ChartKind::BlocksSize | ChartKind::BlocksMemory => "mempool",
            ChartKind::Blocks => "blocks",
            ChartKind::Connections => "network",
        }
    }

    pub const fn chart_type(self) -> ChartType {
        match self {
            ChartKind::StreamItems => ChartType::Stacked,
            ChartKind::BlocksMemory => ChartType::Area,
            _ => ChartType::Line,
        }
    }

    pub const fn priority(self) -> u32 {
        BASE_PRIORITY
            + match self {
                ChartKind::Blocks => 1,
                ChartKind::Connections => 2,
                ChartKind::BlocksSize => 3,
                ChartKind::BlocksMemory => 4,
                ChartKind::StreamItems => 10,
                ChartKind::StreamKeys => 11,
            }
    }

    fn title(self, stream: Option<&str>) -> String {
        match (self, stream) {
            (ChartKind::StreamItems, Some(stream)) => format!("Items in stream {stream}"),
            (ChartKind::StreamKeys, Some(stream)) => format!("Keys in stream {stream}"),
            (ChartKind::StreamItems, None) => "Stream items".to_string(),
            (ChartKind::StreamKeys, None) => "Stream keys".to_string(),
            (ChartKind::BlocksSize, _) => "Mempool size".to_string(),
            (ChartKind::BlocksMemory, _) => "Mempool memory".to_string(),
            (ChartKind::Blocks, _) => "Block count".to_string(),
            (ChartKind::Connections, _) => "Peer connections".to_string(),
        }
    }

    /// The part of the chart id after the dot.
    fn suffix(self, stream: Option<&str>) -> String {
        match (self, stream) {
            (ChartKind::StreamItems, Some(stream)) => format!("stream_{}_items", escape(stream)),
            (ChartKind::StreamKeys, Some(stream)) => format!("stream_{}_keys", escape(stream)),
            _ => self.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum ChartType {
    Line,
    Area,
    Stacked,
}

/// Values are reported as they are read, without computing rates.
#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Algorithm {
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub id: String,
    pub name: String,
    pub algorithm: Algorithm,
    pub multiplier: i64,
    pub divisor: i64,
    pub hidden: bool,
}

impl Dimension {
    pub fn absolute(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            algorithm: Algorithm::Absolute,
            multiplier: 1,
            divisor: 1,
            hidden: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDefinition {
    pub kind: ChartKind,
    /// `multichain_<node>.<suffix>`
    pub id: String,
    pub name: String,
    pub title: String,
    pub units: String,
    pub family: String,
    pub context: String,
    pub chart_type: ChartType,
    pub priority: u32,
    pub update_every: u64,
    pub dimensions: Vec<Dimension>,
}

impl ChartDefinition {
    pub fn new(node: &NodeConfig, kind: ChartKind, stream: Option<&str>) -> Self {
        let suffix = kind.suffix(stream);
        Self {
            kind,
            id: format!("{CHART_TYPE_PREFIX}_{}.{suffix}", escape(&node.name)),
            name: suffix,
            title: kind.title(stream),
            units: kind.units().to_string(),
            family: kind.family().to_string(),
            context: format!("{CHART_TYPE_PREFIX}.{kind}"),
            chart_type: kind.chart_type(),
            priority: kind.priority(),
            update_every: node.update_every,
            dimensions: kind.dimensions().iter().map(|id| Dimension::absolute(id)).collect(),
        }
    }
}

/// Chart ids only allow `[A-Za-z0-9_-]`. `-` is the escape character: it doubles itself, and every other
/// byte outside the set becomes `-` followed by two lowercase hex digits. Distinct names keep distinct ids.
fn escape(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '-' => escaped.push_str("--"),
            c if c.is_ascii_alphanumeric() || c == '_' => escaped.push(c),
            c => {
                let mut buf = [0; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    escaped.push_str(&format!("-{byte:02x}"));
                }
            }
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use multichain_collector_config::RawNodeConfig;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    fn node() -> NodeConfig {
        RawNodeConfig {
            name: Some("node 1".to_string()),
            hostname: Some("h".to_string()),
            port: Some(1),
            username: Some("u".to_string()),
            password: Some("p".to_string()),
            chain: Some("c".to_string()),
            path: Some("/".to_string()),
            update_every: Some(7),
            scheme: None,
        }
        .resolve(5)
        .unwrap()
    }

    #[test]
    fn node_chart() {
        let chart = ChartDefinition::new(&node(), ChartKind::Blocks, None);
        assert_eq!(chart.id, "multichain_node-201.blocks");
        assert_eq!(chart.name, "blocks");
        assert_eq!(chart.context, "multichain.blocks");
        assert_eq!(chart.priority, BASE_PRIORITY + 1);
        assert_eq!(chart.update_every, 7);
        assert_eq!(chart.dimensions, vec![Dimension::absolute("blocks")]);
    }

    #[test]
    fn stream_chart() {
        let chart = ChartDefinition::new(&node(), ChartKind::StreamItems, Some("my.stream"));
        assert_eq!(chart.id, "multichain_node-201.stream_my-2estream_items");
        assert_eq!(chart.title, "Items in stream my.stream");
        assert_eq!(chart.context, "multichain.stream_items");
        assert_eq!(chart.chart_type, ChartType::Stacked);
        let ids: Vec<_> = chart.dimensions.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["confirmed", "unconfirmed"]);
    }

    #[test]
    fn escaped_names_stay_distinct() {
        assert_eq!(escape("chain_1-a"), "chain_1--a");
        assert_eq!(escape("a.b"), "a-2eb");
        assert_eq!(escape("é"), "-c3-a9");

        let names = ["a.b", "a_b", "a-b", "a--b", "a-2eb", "a b", "a_2eb"];
        let mut ids: Vec<_> = names.iter().map(|name| escape(name)).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), names.len());
    }

    #[test]
    fn every_dimension_is_absolute_and_visible() {
        for kind in ChartKind::iter() {
            let chart = ChartDefinition::new(&node(), kind, Some("s"));
            assert!(!chart.dimensions.is_empty());
            for dimension in &chart.dimensions {
                assert_eq!(dimension.algorithm, Algorithm::Absolute);
                assert_eq!((dimension.multiplier, dimension.divisor), (1, 1));
                assert!(!dimension.hidden);
            }
        }
    }
}
