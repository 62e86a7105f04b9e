use clap::Parser;
use profilescout::{DatasetConfig, SearchConfig, ThresholdPolicy};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "profilescout-server")]
#[command(about = "Profile search web form and JSON API")]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "PROFILESCOUT_ADDR", default_value = "0.0.0.0:3000")]
    pub addr: SocketAddr,

    /// Profile dataset (CSV); generated on first search if missing
    #[arg(long, env = "PROFILESCOUT_DATASET", default_value = "profiles.csv")]
    pub dataset: PathBuf,

    /// Candidates fetched from the index before filtering
    #[arg(long, env = "PROFILESCOUT_FAN_OUT", default_value = "50")]
    pub fan_out: usize,

    /// Maximum results shown per search
    #[arg(long, env = "PROFILESCOUT_DISPLAY_CAP", default_value = "50")]
    pub display_cap: usize,

    /// Seed for dataset generation
    #[arg(long, env = "PROFILESCOUT_SEED")]
    pub seed: Option<u64>,

    /// Only treat numbers followed by "+" or a unit word as a threshold
    #[arg(long, env = "PROFILESCOUT_STRICT_UNITS", default_value = "false")]
    pub strict_units: bool,

    /// Allow cross-origin API calls
    #[arg(long, env = "PROFILESCOUT_CORS", default_value = "false")]
    pub cors: bool,
}

impl Config {
    pub fn search_config(&self) -> profilescout::Result<SearchConfig> {
        let policy = if self.strict_units {
            ThresholdPolicy::RequireUnit
        } else {
            ThresholdPolicy::AnyNumber
        };
        SearchConfig::builder()
            .fan_out(self.fan_out)
            .display_cap(self.display_cap)
            .threshold_policy(policy)
            .build()
    }

    pub fn dataset_config(&self) -> DatasetConfig {
        DatasetConfig {
            seed: self.seed,
            ..DatasetConfig::default()
        }
    }
}
