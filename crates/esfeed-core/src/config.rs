//! Configuration types for esfeed.
//!
//! [`Config::load`] layers, lowest priority first: the embedded defaults,
//! `~/.config/esfeed/config.toml` if present, an explicitly named file, and
//! `ESFEED_*` environment variables (`ESFEED_INDEX__BATCH_SIZE=500`).
//! [`Config::defaults`] returns the embedded defaults alone (useful in tests).
//! Nothing is ever written to disk.

use anyhow::ensure;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::indexer::IndexerOptions;
use crate::schema::IndexSettings;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[elasticsearch]
url          = "http://localhost:9200"
timeout_secs = 30

[index]
prefix             = "logstash-"
batch_size         = 100
number_of_shards   = 1
number_of_replicas = 0
# document_type    = "logs"   # set for clusters that still use mapping types
"#;

const ENV_PREFIX: &str = "ESFEED";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub elasticsearch: ElasticsearchConfig,
    #[serde(default)]
    pub index: IndexConfig,
}

/// `[elasticsearch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ElasticsearchConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String { "http://localhost:9200".to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ElasticsearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `[index]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_number_of_shards")]
    pub number_of_shards: u32,
    #[serde(default)]
    pub number_of_replicas: u32,
    #[serde(default)]
    pub document_type: Option<String>,
}

fn default_prefix() -> String { "logstash-".to_string() }
fn default_batch_size() -> usize { 100 }
fn default_number_of_shards() -> u32 { 1 }

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            batch_size: default_batch_size(),
            number_of_shards: default_number_of_shards(),
            number_of_replicas: 0,
            document_type: None,
        }
    }
}

impl IndexConfig {
    pub fn indexer_options(&self) -> IndexerOptions {
        IndexerOptions {
            prefix: self.prefix.clone(),
            batch_size: self.batch_size,
            settings: IndexSettings {
                number_of_shards: self.number_of_shards,
                number_of_replicas: self.number_of_replicas,
            },
            document_type: self.document_type.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. `explicit` must exist when given; the
    /// per-user file is optional.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(user) = user_config_path() {
            builder = builder.add_source(config::File::from(user.as_path()).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let cfg: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Reject values the indexer or client cannot work with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.elasticsearch.url.trim().is_empty(), "elasticsearch.url is empty");
        ensure!(self.elasticsearch.timeout_secs > 0, "elasticsearch.timeout_secs must be > 0");
        ensure!(self.index.batch_size > 0, "index.batch_size must be > 0");
        ensure!(self.index.number_of_shards > 0, "index.number_of_shards must be > 0");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn user_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("esfeed").join("config.toml"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
