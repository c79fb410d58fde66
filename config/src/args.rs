use clap::Parser;
use std::path::PathBuf;

/// MultiChain stats collector, an external plugin for the monitoring agent.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    /// Collection interval in seconds as passed by the agent. Overrides the configured `update_every`.
    #[clap(value_name = "UPDATE_EVERY")]
    pub update_every: Option<u64>,

    /// Optional configuration file, applied on top of the one in the config directory.
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run a single collection cycle for every server and exit.
    #[clap(long, action)]
    pub once: bool,

    /// Enables debug logging on stderr.
    #[clap(long = "verbose", action)]
    pub verbose: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(update_every) = self.update_every {
                cache.insert("update_every".to_string(), update_every.into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let config_dir_path = crate::get_config_dir().display().to_string();

    format!(
        "\
Authors: {author}

Config directory: {config_dir_path}"
    )
}
