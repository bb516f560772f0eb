//! Job tracker CLI
//!
//! Runs the scraper and manages the keyword and employer lists.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use job_tracker::{
    error::{AppError, Result},
    models::Config,
    pipeline,
    registry::{KeywordFile, KeywordLoader, SourceFile, SourceLoader},
    services::Digest,
    storage::{LocalStorage, PostingSink},
};

/// job-tracker - Employer Job Board Scraper
#[derive(Parser, Debug)]
#[command(
    name = "job-tracker",
    version,
    about = "Scrape employer job boards for postings matching your job titles"
)]
struct Cli {
    /// Directory containing config.toml and the keyword/employer lists
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Path to config file (default: {data_dir}/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape every employer and report matching postings
    Run {
        /// Do not write the CSV/JSON exports
        #[arg(long)]
        no_save: bool,

        /// Print the notification digest to stdout
        #[arg(long)]
        digest: bool,
    },

    /// Manage job title keywords
    Keywords {
        #[command(subcommand)]
        action: KeywordAction,
    },

    /// Manage employer job boards
    Sources {
        #[command(subcommand)]
        action: SourceAction,
    },

    /// Validate configuration and lists
    Validate,
}

#[derive(Subcommand, Debug)]
enum KeywordAction {
    /// Show all job titles
    List,
    /// Add a job title
    Add { title: String },
    /// Remove a job title
    Remove { title: String },
}

#[derive(Subcommand, Debug)]
enum SourceAction {
    /// Show all employers
    List,
    /// Add an employer job board
    Add { name: String, url: String },
    /// Remove an employer by name
    Remove { name: String },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.data_dir.join("config.toml"));
    let config = Config::load_or_default(&config_path);

    let keywords = KeywordFile::new(config.paths.keywords_path(&cli.data_dir));
    let sources = SourceFile::new(config.paths.sources_path(&cli.data_dir));

    match cli.command {
        Command::Run { no_save, digest } => {
            config.validate()?;

            let report = pipeline::run_with_config(&config, &cli.data_dir).await?;
            if let Some(error) = report.config_error() {
                log::error!(
                    "{}. Add entries with `job-tracker keywords add` / `job-tracker sources add`.",
                    error
                );
                return Err(AppError::NotConfigured(error.clone()));
            }

            for posting in &report.postings {
                log::info!(
                    "{} - {} ({})",
                    posting.source_name,
                    posting.title,
                    posting.url
                );
            }

            if !no_save {
                let storage =
                    LocalStorage::new(config.paths.output_path(&cli.data_dir), &config.output);
                storage.write_report(&report).await?;
            }

            if digest {
                match Digest::render(&report.postings, &config.output) {
                    Some(message) => println!("Subject: {}\n\n{}", message.subject, message.body),
                    None => log::info!("No matching jobs found."),
                }
            }
        }

        Command::Keywords { action } => match action {
            KeywordAction::List => {
                let titles = keywords.load_keywords()?;
                if titles.is_empty() {
                    log::warn!("No job titles in {}", keywords.path().display());
                }
                for title in titles {
                    println!("{title}");
                }
            }
            KeywordAction::Add { title } => {
                let titles = keywords.add(&title)?;
                log::info!("{} job titles tracked", titles.len());
            }
            KeywordAction::Remove { title } => {
                let titles = keywords.remove(&title)?;
                log::info!("{} job titles tracked", titles.len());
            }
        },

        Command::Sources { action } => match action {
            SourceAction::List => {
                let list = sources.load_sources()?;
                if list.is_empty() {
                    log::warn!("No employers in {}", sources.path().display());
                }
                for source in list {
                    println!("{}\t{}", source.name, source.url);
                }
            }
            SourceAction::Add { name, url } => {
                let list = sources.add(&name, &url)?;
                log::info!("{} employers tracked", list.len());
            }
            SourceAction::Remove { name } => {
                let list = sources.remove(&name)?;
                log::info!("{} employers tracked", list.len());
            }
        },

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({})", config_path.display());

            let titles = keywords.load_keywords()?;
            let list = sources.load_sources()?;
            for source in &list {
                if let Err(e) = source.validate() {
                    log::warn!("Employer '{}': {}", source.name, e);
                }
            }
            log::info!(
                "{} job titles, {} employers configured",
                titles.len(),
                list.len()
            );

            if titles.is_empty() || list.is_empty() {
                return Err(AppError::validation(
                    "at least one job title and one employer are required",
                ));
            }
            log::info!("All validations passed!");
        }
    }

    Ok(())
}
