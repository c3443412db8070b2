use chrono::Local;
use clap::{Parser, Subcommand};
use lunchhunt::config::{AppConfig, load_config};
use lunchhunt::locations::LocationRegistry;
use lunchhunt::matcher::Keywords;
use lunchhunt::notifier::GotifyNotifier;
use lunchhunt::runner::run_batch;
use lunchhunt::schedule::{active_categories, cron_line};
use lunchhunt::scraper::{HttpFetcher, MensaScraper};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lunchhunt")]
#[command(about = "Watches canteen menus and pushes your favorite dishes", long_about = None)]
struct Cli {
    /// Settings file
    #[arg(short, long, default_value = "settings.json", global = true)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape the configured canteens and send notifications (default)
    Run,
    /// List all known location codes
    Locations,
    /// Print the crontab line for the schedule settings
    Cron {
        /// Program the cron job runs
        #[arg(long, default_value = "lunchhunt")]
        program: String,

        /// File the job's output is appended to
        #[arg(long, default_value = "lunchhunt.log")]
        log: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if let Some(Command::Locations) = cli.command {
        list_locations();
        return ExitCode::SUCCESS;
    }

    info!("Using settings file: {}", cli.settings.display());
    let config = match load_config(&cli.settings) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Some(Command::Cron { program, log }) => {
            match cron_line(
                &config.schedule_settings,
                &program,
                &cli.settings.display().to_string(),
                &log.display().to_string(),
            ) {
                Ok(line) => {
                    println!("{line}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("Invalid schedule settings: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        _ => run(config).await,
    }
}

async fn run(config: AppConfig) -> ExitCode {
    info!("Starting execution of LunchHunt.");
    let scraper_settings = &config.scraper_settings;
    let schedule = &config.schedule_settings;

    let Some(menu_categories) = active_categories(
        &scraper_settings.menu_categories,
        Local::now().time(),
        &schedule.time_window_table(),
        schedule.offset,
    ) else {
        info!("All requested meal times have passed. Nothing to do.");
        return ExitCode::SUCCESS;
    };

    let parser = match scraper_settings.parser() {
        Ok(p) => p,
        Err(e) => {
            error!("Invalid selector settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let fetcher = match HttpFetcher::new() {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let notifier = match GotifyNotifier::new(&config.gotify_settings) {
        Ok(n) => n,
        Err(e) => {
            error!("Failed to create notifier: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let scraper = MensaScraper::new(
        fetcher,
        parser,
        LocationRegistry::default(),
        scraper_settings.base_url.clone(),
        menu_categories,
    );
    info!("Initialized MensaScraper and Notifier.");

    let keywords = Keywords::new(&scraper_settings.favorite_foods);
    run_batch(&scraper, &notifier, &scraper_settings.mensen, &keywords).await;

    info!("Finished execution of LunchHunt.");
    ExitCode::SUCCESS
}

fn list_locations() {
    let registry = LocationRegistry::default();
    for entry in registry.entries() {
        println!(
            "{:<5} {:<13} {}",
            entry.code,
            entry.region,
            registry.display_name(&entry.code)
        );
    }
}
