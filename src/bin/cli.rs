use clap::{Parser, Subcommand};
use blink_matcher::{
    providers::{CandidateSource, FileCandidateSource, HubCandidateSource, JsonFileLoader, RecordLoader},
    BlinkLinkTable, BlinkMatcher, MatcherConfig, ScorerKind,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blink-matcher")]
#[command(about = "Match zk-compression analysis results to blinks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the blink whose description best matches a record
    Match {
        /// Analysis result (JSON object)
        record: PathBuf,

        /// Candidate tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Local catalog file (tag -> candidates)
        #[arg(long, conflicts_with = "hub")]
        catalog: Option<PathBuf>,

        /// Dataset hub base URL
        #[arg(long)]
        hub: Option<String>,

        /// Strip punctuation before scoring
        #[arg(long)]
        strip_punctuation: bool,

        /// Similarity scorer
        #[arg(long, value_enum)]
        scorer: Option<ScorerKind>,

        /// Shortest token kept by the TF-IDF tokenizer
        #[arg(long)]
        min_token_len: Option<usize>,
    },

    /// Look up the blink link for a record's top words
    Keywords {
        /// Analysis result (JSON object)
        record: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MatcherConfig::from_file(path)?,
        None => MatcherConfig::default(),
    };

    match cli.command {
        Commands::Match { record, tag, catalog, hub, strip_punctuation, scorer, min_token_len } => {
            if let Some(tag) = tag {
                config.tag = tag;
            }
            if catalog.is_some() || hub.is_some() {
                config.catalog_path = catalog;
                config.hub_url = hub;
            }
            if strip_punctuation {
                config.options.strip_punctuation = true;
            }
            if let Some(scorer) = scorer {
                config.options.scorer = scorer;
            }
            if let Some(len) = min_token_len {
                config.options.min_token_len = len;
            }
            config.validate()?;

            let source: Arc<dyn CandidateSource> = match (&config.catalog_path, &config.hub_url) {
                (Some(path), _) => Arc::new(FileCandidateSource::new(path)),
                (None, Some(url)) => Arc::new(HubCandidateSource::new(
                    url.as_str(),
                    Duration::from_secs(config.timeout_secs),
                )?),
                (None, None) => anyhow::bail!("No candidate source: pass --catalog or --hub"),
            };

            println!("🔍 Matching {} against '{}' ({})", record.display(), config.tag, source.name());

            let matcher = BlinkMatcher::with_source(source, config.options);

            match matcher.run(&record, &config.tag).await? {
                Some(best) => {
                    println!("\n✅ Best result:");
                    println!("   Title: {}", best.title());
                    println!(
                        "   Description: {}",
                        best.candidate.description.as_deref().unwrap_or_default()
                    );
                    println!("   Link: {}", best.url());
                    println!("   Score: {:.4} ({})", best.score, best.ranking_method);
                    println!("   Latency: {:.2}ms", best.latency_ms);
                }
                None => println!("\n😩 No match found"),
            }
        }

        Commands::Keywords { record } => {
            let data = JsonFileLoader::new().load(&record)?;
            let table = match config.blink_links.take() {
                Some(links) => BlinkLinkTable::new(links),
                None => BlinkLinkTable::default(),
            };

            match table.find(&data) {
                Some(hit) => println!("🚨 Matched Blink: {} -> {}", hit.keyword, hit.link),
                None => println!("🚨 Matched Blink: No blink found"),
            }

            println!("📊 Blockchain relevance score: {:.2}%", table.relevance(&data) * 100.0);

            for field in ["total_links_analyzed", "total_unique_words"] {
                if let Some(value) = data.get(field) {
                    println!("   {}: {}", field, value);
                }
            }
        }
    }

    Ok(())
}
