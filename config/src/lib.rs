#[macro_use]
extern crate tracing;

mod app_config;
mod args;
mod node_config;

pub use app_config::{
    get_config_dir,
    AppConfig,
};
pub use args::Args;
pub use node_config::{
    NodeConfig,
    NodeConfigError,
    RawNodeConfig,
    Scheme,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::time::Duration;

pub const DEFAULT_UPDATE_EVERY: u64 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

fn default_update_every() -> u64 {
    DEFAULT_UPDATE_EVERY
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(flatten, skip_serializing)]
    pub app_config: AppConfig,
    #[serde(default)]
    pub enable_autodetect: bool,
    /// Global collection interval in seconds, inherited by servers without their own.
    #[serde(default = "default_update_every")]
    pub update_every: u64,
    /// Upper bound in seconds for a single RPC request.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<RawNodeConfig>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_config: AppConfig::default(),
            enable_autodetect: false,
            update_every: DEFAULT_UPDATE_EVERY,
            timeout: DEFAULT_TIMEOUT_SECS,
            servers: None,
        }
    }
}

impl Config {
    /// Layers the embedded defaults, `config.yaml` from the config directory, the file given with
    /// `--config` and finally the command line.
    pub fn new(args: Args) -> Result<Self, config::ConfigError> {
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Yaml));

        let config_files = [("config.yaml", config::FileFormat::Yaml)];

        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
        }

        if let Some(path) = &args.config {
            builder = builder.add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Yaml)
                    .required(true),
            );
        }

        builder = builder.add_source(args);

        let cfg: Self = builder.build()?.try_deserialize()?;
        debug!(
            update_every = cfg.update_every,
            enable_autodetect = cfg.enable_autodetect,
            servers = cfg.servers.as_ref().map(Vec::len).unwrap_or_default(),
            "Configuration loaded"
        );

        Ok(cfg)
    }

    /// Request timeout of the RPC clients. A zero timeout would fail every request, so it is raised to
    /// one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.max(1))
    }

    /// Resolves every `servers` entry, pairing the raw entry's position with its outcome.
    pub fn nodes(&self) -> Vec<(usize, Result<NodeConfig, NodeConfigError>)> {
        self.servers
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, raw)| (index, raw.resolve(self.update_every)))
            .collect()
    }
}
