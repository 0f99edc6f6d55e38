use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use esfeed_core::config::Config;
use esfeed_core::{IndexStore, Indexer, MemoryStore, Summary};
use esfeed_elastic::ElasticStore;

#[derive(Parser)]
#[command(
    name = "esfeed",
    about = "Bulk-load CSV log lines from stdin into daily Elasticsearch indices"
)]
struct Cli {
    /// Config file layered over the defaults and ~/.config/esfeed/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Elasticsearch base URL (overrides elasticsearch.url).
    #[arg(long)]
    url: Option<String>,

    /// Index name prefix (overrides index.prefix).
    #[arg(long)]
    prefix: Option<String>,

    /// Documents per bulk request (overrides index.batch_size).
    #[arg(long)]
    batch_size: Option<usize>,

    /// Mapping type for clusters that still use them (overrides index.document_type).
    #[arg(long)]
    document_type: Option<String>,

    /// Parse and batch everything without contacting Elasticsearch.
    #[arg(long)]
    dry_run: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    debug: bool,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load(self.config.as_deref()).context("loading configuration")?;

        if let Some(url) = &self.url {
            config.elasticsearch.url = url.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.index.prefix = prefix.clone();
        }
        if let Some(batch_size) = self.batch_size {
            config.index.batch_size = batch_size;
        }
        if let Some(document_type) = &self.document_type {
            config.index.document_type = Some(document_type.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let default_level = if cli.debug { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

async fn load_stdin<S: IndexStore>(store: S, config: &Config) -> anyhow::Result<Summary> {
    let mut indexer = Indexer::new(store, config.index.indexer_options());
    let summary = esfeed::load(std::io::stdin().lock(), &mut indexer)
        .await
        .context("loading records from stdin")?;
    Ok(summary)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.resolve_config()?;
    tracing::debug!(?config, dry_run = cli.dry_run, "esfeed starting");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let summary = if cli.dry_run {
        runtime.block_on(load_stdin(MemoryStore::new(), &config))?
    } else {
        let store = ElasticStore::new(&config.elasticsearch.url, config.elasticsearch.timeout())?;
        runtime.block_on(load_stdin(store, &config))?
    };

    tracing::info!(
        documents = summary.documents,
        batches = summary.batches,
        indices = summary.indices.len(),
        dry_run = cli.dry_run,
        "load complete"
    );
    Ok(())
}
