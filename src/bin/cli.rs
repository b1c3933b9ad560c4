//! leettrack CLI
//!
//! Terminal front end over the question data-access service.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use leettrack::{
    config::{self, CacheBackend, DEFAULT_DATA_DIR},
    error::{AppError, Result},
    models::{CompanySummary, Config, DataOrigin, ProgressUpdate, Question, QuestionId},
    services::{FetchOptions, QueryFilter, query},
    utils::{format_age, log as console, truncate},
};

/// leettrack - interview question progress tracker
#[derive(Parser, Debug)]
#[command(
    name = "leettrack",
    version,
    about = "Track progress on company-tagged coding interview questions"
)]
struct Cli {
    /// Directory holding config.toml and the cache
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Keep the cache in memory for this run only
    #[arg(long)]
    no_persist: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List questions
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Ignore the cache and fetch from the API
        #[arg(long)]
        refresh: bool,
    },

    /// Show one company's questions and stats
    Company {
        /// Company name (case-insensitive)
        name: String,
    },

    /// Search titles, companies, tags and descriptions
    Search {
        /// Free-text query
        query: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show overall progress statistics
    Stats,

    /// Show per-company progress
    Companies,

    /// Record progress on a question
    Progress {
        /// Question id
        id: String,

        #[command(flatten)]
        update: ProgressArgs,
    },

    /// Remove the cached snapshot
    ClearCache,

    /// Validate configuration
    Validate,

    /// Show configuration and cache state
    Info,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Only this company
    #[arg(long)]
    company: Option<String>,

    /// Only this difficulty (easy, medium, hard)
    #[arg(long)]
    difficulty: Option<String>,

    /// Only solved questions
    #[arg(long, conflicts_with = "unsolved")]
    solved: bool,

    /// Only unsolved questions
    #[arg(long)]
    unsolved: bool,

    /// Match any of these tags (substring, repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> QueryFilter {
        QueryFilter {
            company: self.company.clone(),
            difficulty: self.difficulty.clone(),
            solved: match (self.solved, self.unsolved) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            tags: self.tags.clone(),
        }
    }
}

#[derive(Args, Debug)]
struct ProgressArgs {
    /// Mark as solved
    #[arg(long, conflicts_with = "unsolved")]
    solved: bool,

    /// Mark as unsolved
    #[arg(long)]
    unsolved: bool,

    /// Set the attempt count
    #[arg(long)]
    attempts: Option<u32>,

    /// Replace the notes
    #[arg(long)]
    notes: Option<String>,

    /// Set the time complexity
    #[arg(long)]
    time_complexity: Option<String>,

    /// Set the space complexity
    #[arg(long)]
    space_complexity: Option<String>,

    /// Record an attempt now
    #[arg(long)]
    touch: bool,
}

impl ProgressArgs {
    fn to_update(&self) -> ProgressUpdate {
        ProgressUpdate {
            solved: match (self.solved, self.unsolved) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            attempts: self.attempts,
            last_attempt: self.touch.then(Utc::now),
            notes: self.notes.clone(),
            time_complexity: self.time_complexity.clone(),
            space_complexity: self.space_complexity.clone(),
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
    console::init(level);
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load_config(&cli.data_dir);
    let backend = if cli.no_persist {
        CacheBackend::Memory
    } else {
        CacheBackend::Disk
    };

    let build = || config::build_service(&config, &cli.data_dir, backend);

    match cli.command {
        Command::List { filters, refresh } => {
            let service = build()?;
            let options = if refresh {
                FetchOptions::refresh()
            } else {
                FetchOptions::default()
            };
            let fetched = service.fetch_questions(&options).await?;
            let questions = query::filter(&fetched.questions, &filters.to_filter());

            if fetched.origin == DataOrigin::Fallback {
                console::warn("API unavailable; showing sample questions");
            }
            console::header(&format!("Questions ({} source)", fetched.origin));
            print_questions(&questions);
        }

        Command::Company { name } => {
            let service = build()?;
            let questions = service.get_questions_by_company(&name).await?;
            let summary = CompanySummary::from_questions(name.as_str(), &questions);

            console::header(&name);
            print_company(&summary);
            console::separator();
            print_questions(&questions);
        }

        Command::Search { query, filters } => {
            let service = build()?;
            let questions = service.search_questions(&query, &filters.to_filter()).await?;
            console::header(&format!("Search: {query:?}"));
            print_questions(&questions);
        }

        Command::Stats => {
            let stats = build()?.user_stats().await?;
            console::summary(
                "Progress",
                &[
                    ("Solved", format!("{}/{}", stats.solved, stats.total)),
                    ("Success rate", format!("{}%", stats.success_rate)),
                    ("Easy", format!("{}/{}", stats.easy_solved, stats.easy)),
                    ("Medium", format!("{}/{}", stats.medium_solved, stats.medium)),
                    ("Hard", format!("{}/{}", stats.hard_solved, stats.hard)),
                    ("Companies", stats.companies.to_string()),
                ],
            );
            if !stats.recent_activity.is_empty() {
                console::header("Recent activity");
                for q in &stats.recent_activity {
                    let when = q
                        .last_attempt
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default();
                    console::sub_item(&format!("{when}  {} ({})", q.title, q.company));
                }
            }
        }

        Command::Companies => {
            let summaries = build()?.company_summaries().await?;
            console::header(&format!("{} companies", summaries.len()));
            for summary in &summaries {
                print_company(summary);
            }
        }

        Command::Progress { id, update } => {
            let update = update.to_update();
            if update.is_empty() {
                return Err(AppError::validation(
                    "Nothing to update; pass at least one field",
                ));
            }
            let ack = build()?
                .update_progress(&QuestionId::from(id.as_str()), &update)
                .await?;
            console::success(&format!("Updated question {id}"));
            log::debug!("Server acknowledgment: {ack}");
        }

        Command::ClearCache => {
            build()?.clear_cache().await?;
            console::success("Cache cleared");
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                console::error(&format!("Config validation failed: {e}"));
                return Err(e);
            }
            console::success("Config OK");
        }

        Command::Info => show_info(&config, &cli.data_dir, backend).await?,
    }

    Ok(())
}

async fn show_info(config: &Config, data_dir: &Path, backend: CacheBackend) -> Result<()> {
    console::summary(
        "Configuration",
        &[
            ("Data directory", data_dir.display().to_string()),
            ("API base URL", config.api.base_url.clone()),
            ("Timeout", format!("{} ms", config.api.timeout_ms)),
            ("Cache TTL", format!("{} s", config.cache.ttl_secs)),
        ],
    );

    if backend == CacheBackend::Memory {
        console::info("Cache: in-memory (nothing persisted)");
        return Ok(());
    }

    let service = config::build_service(config, data_dir, backend)?;
    match service.cache().read().await? {
        Some(snapshot) => console::summary(
            "Cache",
            &[
                ("Questions", snapshot.questions.len().to_string()),
                ("Age", format_age(snapshot.age)),
                ("Fresh", snapshot.fresh.to_string()),
            ],
        ),
        None => console::info("No cached snapshot."),
    }
    Ok(())
}

fn print_questions(questions: &[Question]) {
    if questions.is_empty() {
        console::info("No questions found.");
        return;
    }
    for q in questions {
        let mark = if q.solved { "✓" } else { " " };
        console::sub_item(&format!(
            "[{mark}] #{:<5} {:<48} {:<10} {:<7} {}",
            q.id.to_string(),
            truncate(&q.title, 48),
            truncate(&q.company, 10),
            q.difficulty,
            q.tags.join(", ")
        ));
    }
    console::info(&format!("{} question(s)", questions.len()));
}

fn print_company(summary: &CompanySummary) {
    console::sub_item(&format!(
        "{:<16} {:>3}/{:<3} solved ({:>3}%)  easy {} · medium {} · hard {}",
        summary.name,
        summary.solved,
        summary.total,
        summary.progress,
        summary.easy,
        summary.medium,
        summary.hard
    ));
}
