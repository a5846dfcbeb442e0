//! CLI commands implementation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use console::style;

use filmcrawl::config::Settings;
use filmcrawl::models::{FilterCriteria, Vocabulary};
use filmcrawl::output::TsvSink;
use filmcrawl::scrapers::{build_query, load_vocabulary, HttpClient};

use super::icons;

#[derive(Parser)]
#[command(name = "filmcrawl")]
#[command(about = "Crawl filtered title search results into a TSV table")]
#[command(version)]
pub struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Log file path from the raw arguments (for early logging setup).
pub fn log_file_arg() -> Option<PathBuf> {
    find_log_file(std::env::args())
}

fn find_log_file(args: impl IntoIterator<Item = String>) -> Option<PathBuf> {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--log-file" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--log-file=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl titles matching the filters and write them to a TSV file
    Crawl(CrawlArgs),

    /// Show the title types, genres and countries accepted as filters
    Vocabulary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct CrawlArgs {
    /// Title type codes (comma-separated or repeated)
    #[arg(long = "title-type", value_delimiter = ',')]
    title_types: Vec<String>,

    /// Earliest release date (YYYY-MM-DD)
    #[arg(long)]
    release_date_from: Option<String>,

    /// Latest release date (YYYY-MM-DD)
    #[arg(long)]
    release_date_to: Option<String>,

    /// Genre codes (comma-separated or repeated)
    #[arg(long, value_delimiter = ',')]
    genres: Vec<String>,

    /// Minimum user rating, 0 to 10
    #[arg(long)]
    min_user_rating: Option<String>,

    /// Maximum user rating, 0 to 10
    #[arg(long)]
    max_user_rating: Option<String>,

    /// Country name or code
    #[arg(long)]
    country: Option<String>,

    /// Output TSV path (defaults to the configured output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Limit number of titles to crawl (0 = only the configured maximum)
    #[arg(short, long, default_value = "0")]
    limit: usize,
}

impl CrawlArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            title_types: self.title_types.clone(),
            release_date_from: self.release_date_from.clone(),
            release_date_to: self.release_date_to.clone(),
            genres: self.genres.clone(),
            min_user_rating: self.min_user_rating.clone(),
            max_user_rating: self.max_user_rating.clone(),
            country: self.country.clone(),
        }
    }

    fn cap(&self, max_results: usize) -> usize {
        if self.limit > 0 {
            self.limit.min(max_results)
        } else {
            max_results
        }
    }
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Crawl(args) => cmd_crawl(&settings, &args).await,
        Commands::Vocabulary { json } => cmd_vocabulary(&settings, json).await,
    }
}

async fn cmd_crawl(settings: &Settings, args: &CrawlArgs) -> anyhow::Result<()> {
    let site = settings.site()?;
    let client = HttpClient::from_settings(settings)?;

    let vocab = load_vocabulary(&client, &site).await?;
    let query = build_query(&args.criteria(), &vocab)?;

    let output = args.output.clone().unwrap_or_else(|| settings.output.clone());
    let mut sink = TsvSink::create(&output)?;
    println!("{} Crawling into {}", icons::info(), output.display());

    let summary = filmcrawl::run(
        &client,
        &site,
        &vocab,
        query,
        args.cap(settings.max_results),
        &mut sink,
    )
    .await?;

    if summary.resolved == 0 {
        println!("{} No titles match these filters", icons::warn());
    } else if summary.is_short() {
        println!(
            "{} Wrote {} of {} titles (listing ended early)",
            icons::warn(),
            summary.written,
            summary.target
        );
    } else {
        println!(
            "{} Wrote {} titles ({} matched)",
            icons::success(),
            style(summary.written).bold(),
            summary.resolved
        );
    }

    Ok(())
}

async fn cmd_vocabulary(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let site = settings.site()?;
    let client = HttpClient::from_settings(settings)?;
    let vocab = load_vocabulary(&client, &site).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&vocab)?);
    } else {
        print_vocabulary(&vocab);
    }
    Ok(())
}

fn print_vocabulary(vocab: &Vocabulary) {
    println!("\n{}", style("Title types").bold());
    for code in &vocab.title_types {
        println!("  {} {}", icons::bullet(), code);
    }

    println!("\n{}", style("Genres").bold());
    for code in &vocab.genres {
        println!("  {} {}", icons::bullet(), code);
    }

    println!("\n{}", style("Countries").bold());
    for (name, code) in &vocab.countries {
        println!("  {} {:<32} {}", icons::bullet(), name, style(code).dim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_crawl_args_to_criteria() {
        let cli = parse(&[
            "filmcrawl",
            "crawl",
            "--genres",
            "comedy,drama",
            "--title-type",
            "feature",
            "--min-user-rating",
            "7.0",
            "--country",
            "France",
        ]);
        let Commands::Crawl(args) = cli.command else {
            panic!("expected crawl command");
        };
        let criteria = args.criteria();
        assert_eq!(criteria.genres, vec!["comedy", "drama"]);
        assert_eq!(criteria.title_types, vec!["feature"]);
        assert_eq!(criteria.min_user_rating.as_deref(), Some("7.0"));
        assert_eq!(criteria.max_user_rating, None);
        assert_eq!(criteria.country.as_deref(), Some("France"));
    }

    #[test]
    fn test_limit_only_lowers_cap() {
        let cli = parse(&["filmcrawl", "crawl", "--limit", "20"]);
        let Commands::Crawl(args) = cli.command else {
            panic!("expected crawl command");
        };
        assert_eq!(args.cap(1000), 20);
        assert_eq!(args.cap(10), 10);

        let cli = parse(&["filmcrawl", "crawl"]);
        let Commands::Crawl(args) = cli.command else {
            panic!("expected crawl command");
        };
        assert_eq!(args.cap(1000), 1000);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["filmcrawl", "vocabulary", "--json", "-v", "--log-file", "run.log"]);
        assert!(cli.verbose);
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn test_find_log_file() {
        let args = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(
            find_log_file(args(&["filmcrawl", "--log-file", "a.log", "crawl"])),
            Some(PathBuf::from("a.log"))
        );
        assert_eq!(
            find_log_file(args(&["filmcrawl", "crawl", "--log-file=b.log"])),
            Some(PathBuf::from("b.log"))
        );
        assert_eq!(find_log_file(args(&["filmcrawl", "crawl"])), None);
    }
}
