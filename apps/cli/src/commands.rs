//! CLI command definitions, routing, and tracing setup.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use mentorscout_core::{CompetitorAnalyst, FinderOptions, GeminiReportClient, MentorFinder};
use mentorscout_extract::HttpSentimentClient;
use mentorscout_ranking::HttpEmbeddingClient;
use mentorscout_search::{GoogleSearchProvider, HttpPageFetcher};
use mentorscout_shared::{
    AppConfig, Candidate, config_file_path, init_config, load_config, resolve_google_credentials,
    resolve_oracle_token, resolve_report_key,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// MentorScout — discover and rank startup mentors.
#[derive(Parser)]
#[command(
    name = "mentorscout",
    version,
    about = "Find vetted startup mentors and analyze the competition for an idea.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Find mentors for a field of interest.
    Mentors {
        /// Field of interest, e.g. "fintech" or "sustainable fashion".
        field: String,

        /// Restrict the search to a location.
        #[arg(short, long)]
        location: Option<String>,

        /// Number of mentors to return (defaults to config).
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Minimum years of experience (defaults to config; 0 disables).
        #[arg(long)]
        min_experience: Option<u32>,

        /// Emit results as JSON instead of a human-readable list.
        #[arg(long)]
        json: bool,
    },

    /// Analyze the competitive landscape around a product idea.
    Competitors {
        /// The product idea, e.g. "expense tracking for freelancers".
        idea: String,

        /// Maximum number of competitors to analyze.
        #[arg(short, long, default_value = "5")]
        limit: usize,

        /// Emit the report as JSON instead of human-readable text.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "mentorscout=info",
        1 => "mentorscout=debug",
        _ => "mentorscout=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Mentors {
            field,
            location,
            top_k,
            min_experience,
            json,
        } => cmd_mentors(&field, location.as_deref(), top_k, min_experience, json).await,
        Command::Competitors { idea, limit, json } => cmd_competitors(&idea, limit, json).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Collaborator wiring
// ---------------------------------------------------------------------------

/// Shared API client plus the search and page-fetch collaborators.
struct Collaborators {
    api_client: reqwest::Client,
    provider: Arc<GoogleSearchProvider>,
    fetcher: Arc<HttpPageFetcher>,
    sentiment: Arc<HttpSentimentClient>,
}

/// Timeout for API calls (search, oracles); page fetches carry their own.
const API_TIMEOUT_SECS: u64 = 30;

fn build_collaborators(config: &AppConfig) -> Result<Collaborators> {
    let credentials = resolve_google_credentials(config)?;
    let oracle_token = resolve_oracle_token(config);

    let api_client = reqwest::Client::builder()
        .user_agent(concat!("MentorScout/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(API_TIMEOUT_SECS))
        .build()?;
    let provider = Arc::new(GoogleSearchProvider::new(
        api_client.clone(),
        credentials.api_key,
        credentials.cse_id,
    ));
    let fetcher = Arc::new(HttpPageFetcher::new()?);
    let sentiment = Arc::new(HttpSentimentClient::new(
        api_client.clone(),
        config.oracles.sentiment_endpoint.clone(),
        oracle_token,
    ));

    Ok(Collaborators {
        api_client,
        provider,
        fetcher,
        sentiment,
    })
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    bar.enable_steady_tick(std::time::Duration::from_millis(80));
    bar.set_message(message.to_string());
    bar
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_mentors(
    field: &str,
    location: Option<&str>,
    top_k: Option<usize>,
    min_experience: Option<u32>,
    json: bool,
) -> Result<()> {
    let config = load_config()?;
    let collaborators = build_collaborators(&config)?;

    let embedder = Arc::new(HttpEmbeddingClient::new(
        collaborators.api_client.clone(),
        config.oracles.embedding_endpoint.clone(),
        resolve_oracle_token(&config),
    ));

    let options = FinderOptions {
        results_per_query: config.defaults.results_per_query,
        min_experience: min_experience.unwrap_or(config.defaults.min_experience),
    };
    let top_k = top_k.unwrap_or(config.defaults.top_k);

    let finder = MentorFinder::new(
        collaborators.provider,
        collaborators.fetcher,
        collaborators.sentiment,
        embedder,
        options,
    );

    info!(field, ?location, top_k, "searching for mentors");

    let bar = spinner(&format!("Searching for {field} mentors..."));
    let mentors = finder.find_mentors(field, location, top_k).await;
    bar.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&mentors)?);
        return Ok(());
    }

    if mentors.is_empty() {
        println!("No mentors found for \"{field}\". Try a broader field.");
        return Ok(());
    }

    println!();
    println!("  Top {} mentors for \"{field}\":", mentors.len());
    println!();
    for (index, mentor) in mentors.iter().enumerate() {
        print_mentor(index + 1, mentor);
    }

    Ok(())
}

fn print_mentor(rank: usize, mentor: &Candidate) {
    println!("  {rank}. {}  (score {:.3})", mentor.name, mentor.relevance_score);
    if !mentor.title.is_empty() {
        println!("     {}", mentor.title);
    }
    if mentor.experience_years > 0 {
        println!("     Experience: {} years", mentor.experience_years);
    }
    if !mentor.expertise.is_empty() {
        println!("     Expertise:  {}", mentor.expertise.join(", "));
    }
    println!("     Profile:    {}", mentor.profile_url);
    println!();
}

async fn cmd_competitors(idea: &str, limit: usize, json: bool) -> Result<()> {
    let config = load_config()?;
    let collaborators = build_collaborators(&config)?;
    let report_key = resolve_report_key(&config)?;

    let reporter = Arc::new(GeminiReportClient::new(
        collaborators.api_client.clone(),
        config.report.endpoint.clone(),
        report_key,
    ));

    let analyst = CompetitorAnalyst::new(
        collaborators.provider,
        collaborators.fetcher,
        collaborators.sentiment,
        reporter,
    );

    info!(idea, limit, "analyzing competitors");

    let bar = spinner("Analyzing the competitive landscape...");
    let report = analyst.analyze(idea, limit).await;
    bar.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    if report.competitors.is_empty() {
        println!("  No competitors found for \"{idea}\".");
    } else {
        println!("  Competitors for \"{idea}\":");
        println!();
        for competitor in &report.competitors {
            println!(
                "  - {}  (sentiment {:.2})",
                competitor.name, competitor.sentiment_score
            );
            if let Some(website) = &competitor.website {
                println!("    {website}");
            }
            println!("    {}", competitor.summary);
            println!();
        }
    }

    println!("  Feasibility:");
    println!();
    for line in report.feasibility.lines() {
        println!("  {line}");
    }
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config file created at {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let path = config_file_path()?;

    println!("# Resolved config ({})", path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
