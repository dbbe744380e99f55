use anyhow::{Context, Result};
use arxiv_search::client::search_for_query;
use arxiv_search::config::{find_config_file, get_config, load_config, Config, SearchDefaults};
use arxiv_search::models::{ArxivEntry, SearchFeed, SearchQuery, Tag};
use arxiv_search::{ArxivClient, ArxivSearch};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// arXiv Search - Query the arXiv API with boolean tag groups
#[derive(Parser, Debug)]
#[command(name = "arxiv-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search arXiv papers from the command line", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the configuration)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (plain if TTY, JSON otherwise)
    Auto,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Query arguments shared by `search` and `url`
#[derive(Args, Debug)]
struct QueryArgs {
    /// Free-text terms, each matched against all fields
    terms: Vec<String>,

    /// Required tag as prefix:name (e.g. ti:transformer, cat:cs.AI)
    #[arg(long = "tag", short = 't')]
    tags: Vec<String>,

    /// Excluded tag as prefix:name
    #[arg(long = "exclude", short = 'x')]
    excludes: Vec<String>,

    /// Required category (e.g. cs.LG, cs*)
    #[arg(long)]
    category: Vec<String>,

    /// Required author
    #[arg(long)]
    author: Vec<String>,

    /// Sort by: relevance, lastUpdatedDate or submittedDate
    #[arg(long)]
    sort_by: Option<String>,

    /// Sort order: ascending or descending
    #[arg(long)]
    sort_order: Option<String>,

    /// Offset of the first result
    #[arg(long, default_value_t = 0)]
    start: u32,

    /// Maximum number of results
    #[arg(long, short)]
    max_results: Option<u32>,

    /// Read the whole query model from a JSON file instead
    #[arg(
        long,
        conflicts_with_all = [
            "terms", "tags", "excludes", "category", "author",
            "sort_by", "sort_order", "start", "max_results",
        ]
    )]
    query_file: Option<PathBuf>,
}

impl QueryArgs {
    fn to_query(&self, defaults: &SearchDefaults) -> Result<SearchQuery> {
        if let Some(path) = &self.query_file {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return Ok(SearchQuery::from_json(&json)?);
        }

        let mut search = ArxivSearch::new();
        for term in &self.terms {
            search = search.with_query(term.as_str());
        }
        for token in &self.tags {
            let tag: Tag = token.parse()?;
            search = search.with_tag(tag.name, tag.prefix);
        }
        for category in &self.category {
            search = search.in_category(category.as_str());
        }
        for author in &self.author {
            search = search.by_author(author.as_str());
        }
        for token in &self.excludes {
            let tag: Tag = token.parse()?;
            search = search.exclude_tag(tag.name, tag.prefix);
        }

        let mut query = search
            .start_at(self.start)
            .max_results(self.max_results.unwrap_or(defaults.max_results))
            .build();
        query.sort_by = match &self.sort_by {
            Some(value) => Some(value.parse()?),
            None => defaults.sort_by,
        };
        query.sort_order = match &self.sort_order {
            Some(value) => Some(value.parse()?),
            None => defaults.sort_order,
        };

        Ok(query)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search arXiv with tags and tag groups
    #[command(alias = "s")]
    Search(QueryArgs),

    /// Search computer science papers for free text, newest updates first
    For {
        /// Search text
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Print the request URL for a query without sending it
    Url(QueryArgs),

    /// Print the effective configuration as TOML
    Config,
}

fn load(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        get_config()?
    };

    if let Some(timeout) = cli.timeout {
        config.api.timeout_secs = timeout;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("arxiv_search={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load(&cli)?;

    match &cli.command {
        Commands::Search(args) => {
            let query = args.to_query(&config.search)?;
            let client = ArxivClient::from_config(&config)?;
            let feed = client.search_feed(&query).await?;
            output_feed(&feed, cli.output, cli.quiet)?;
        }
        Commands::For { text } => {
            let client = ArxivClient::from_config(&config)?;
            let query = search_for_query(&text.join(" "));
            let feed = client.search_feed(&query).await?;
            output_feed(&feed, cli.output, cli.quiet)?;
        }
        Commands::Url(args) => {
            let query = args.to_query(&config.search)?;
            let client = ArxivClient::from_config(&config)?;
            println!("{}", client.build_url(&query)?);
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn output_feed(feed: &SearchFeed, format: OutputFormat, quiet: bool) -> Result<()> {
    let plain = match format {
        OutputFormat::Auto => std::io::stdout().is_terminal(),
        OutputFormat::Plain => true,
        OutputFormat::Json => false,
    };

    if !plain {
        println!("{}", serde_json::to_string_pretty(&feed.entries)?);
        return Ok(());
    }

    for entry in &feed.entries {
        print_entry(entry);
    }
    if !quiet {
        eprintln!(
            "Showing {} of {} results (from {})",
            feed.entries.len(),
            feed.total_results,
            feed.start_index
        );
    }
    Ok(())
}

fn print_entry(entry: &ArxivEntry) {
    println!("{} - {}", entry.title, entry.authors.join(", "));
    println!("  ID: {}", entry.arxiv_id());
    if !entry.published.is_empty() {
        println!("  Published: {}", entry.published);
    }
    let categories = entry.category_terms();
    if !categories.is_empty() {
        println!("  Categories: {}", categories.join(", "));
    }
    if let Some(pdf_url) = entry.pdf_url() {
        println!("  PDF: {}", pdf_url);
    }
    println!();
}
