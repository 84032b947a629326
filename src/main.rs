mod config;
mod db;
mod logging;
mod matching;
mod models;
mod seed;
mod state;
mod tui;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use config::Config;
use db::{Database, SAVED_JOBS_KEY, USER_KEY};
use models::{Job, UserMode, UserProfile};
use rand::rngs::StdRng;
use rand::SeedableRng;
use state::AppState;

#[derive(Parser)]
#[command(name = "pact")]
#[command(about = "Browse local service jobs and see how well they match you")]
struct Cli {
    /// Seed for score jitter and filler reasons (reproducible output)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    #[command(flatten)]
    Jobs(JobCommands),
}

/// Commands that run against the loaded, scored job list.
#[derive(Subcommand)]
enum JobCommands {
    /// List jobs
    List {
        /// Filter by category (assembly, moving, tech, cleaning, ...)
        #[arg(short, long)]
        category: Option<String>,

        /// Only show strong matches, best first
        #[arg(short, long)]
        matches_only: bool,
    },

    /// Show job details and why it matches
    Show {
        /// Job ID
        id: i64,
    },

    /// List jobs at or above a match score
    Matches {
        /// Minimum score (defaults to the configured threshold)
        #[arg(short, long)]
        min_score: Option<i32>,
    },

    /// Save or unsave a job
    Save {
        /// Job ID
        id: i64,
    },

    /// List saved jobs
    Saved,

    /// Change your location and rescore
    Location {
        /// New location, e.g. "Uppsala"
        name: String,
    },

    /// Switch between helper and needer mode
    Mode {
        /// helper or needer
        mode: String,
    },

    /// Show your profile
    Profile,

    /// List job categories
    Categories,

    /// Browse jobs interactively
    Browse,

    /// Forget stored profile and saved jobs
    Reset {
        /// Only forget saved jobs
        #[arg(long)]
        saved_only: bool,
    },
}

fn load_state(db: &Database, config: &Config) -> Result<AppState> {
    let mut user: UserProfile = db.get(USER_KEY)?.unwrap_or_default();
    user.skills = config.skills.clone();

    let mut state = AppState::new(user);
    state.load_jobs(seed::sample_jobs());
    state.load_saved_jobs(db.get(SAVED_JOBS_KEY)?.unwrap_or_default());
    Ok(state)
}

fn save_state(db: &Database, state: &AppState) -> Result<()> {
    db.set(USER_KEY, state.user())?;
    db.set(SAVED_JOBS_KEY, &state.saved_jobs())?;
    Ok(())
}

fn print_job_table(jobs: &[&Job]) {
    println!(
        "{:<4} {:>6} {:<32} {:<26} {:>9}",
        "ID", "MATCH", "TITLE", "LOCATION", "PRICE"
    );
    println!("{}", "-".repeat(81));
    for job in jobs {
        println!(
            "{:<4} {:>5}% {:<32} {:<26} {:>9}",
            job.id,
            job.match_score,
            truncate(&job.title, 30),
            truncate(&job.location, 24),
            job.price
        );
    }
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = Config::load()?;
    let db = Database::open()?;

    let mut rng = match cli.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let command = match cli.command {
        Commands::Init => {
            db.init()?;
            if db.get::<UserProfile>(USER_KEY)?.is_none() {
                db.set(USER_KEY, &UserProfile::default())?;
            }
            println!("Database initialized at {}", db.path().display());
            return Ok(());
        }
        Commands::Jobs(command) => command,
    };

    db.ensure_initialized()?;
    let mut state = load_state(&db, &config)?;
    state.rescore(config.jitter, &mut rng);
    tracing::info!(
        jobs = state.jobs().len(),
        location = %state.user().location,
        "scored jobs"
    );

    match command {
        JobCommands::List {
            category,
            matches_only,
        } => {
            let jobs: Vec<&Job> = match (&category, matches_only) {
                (Some(cat), false) => state.jobs_in_category(cat),
                (None, false) => state.jobs().iter().collect(),
                (cat, true) => {
                    let mut top = state.top_matches(config.min_match_score);
                    if let Some(cat) = cat {
                        top.retain(|j| &j.category == cat);
                    }
                    top
                }
            };
            if jobs.is_empty() {
                println!("No jobs found.");
            } else {
                print_job_table(&jobs);
            }
        }

        JobCommands::Show { id } => {
            let job = state.job(id).ok_or_else(|| anyhow!("Job #{} not found", id))?;
            let user = state.user();
            let base = matching::base_score(job, &user.location, &user.skills);
            let color = matching::match_score_color(job.match_score);

            println!("Job #{}{}", job.id, if state.is_saved(id) { " (saved)" } else { "" });
            println!("Title: {}", job.title);
            println!("Category: {}", job.category);
            println!("Location: {}", job.location);
            println!("Time: {}", job.time);
            println!("Price: {}", job.price);
            println!("Skills: {}", job.skills.join(", "));
            println!("Posted: {} by {}", job.date, job.author);
            println!(
                "Match: {}% ({}, {}), base {}",
                job.match_score,
                color,
                color.hex(),
                base
            );
            println!("\nWhy it matches:");
            for reason in matching::match_reasons(job, user, &mut rng) {
                println!("  - {}", reason);
            }
            println!("\n--- Description ---");
            println!("{}", textwrap::fill(&job.description, 72));
        }

        JobCommands::Matches { min_score } => {
            let min = min_score.unwrap_or(config.min_match_score);
            let jobs = matching::filter_by_match(state.jobs(), min);
            if jobs.is_empty() {
                println!("No jobs scored {} or higher.", min);
            } else {
                print_job_table(&jobs);
            }
        }

        JobCommands::Save { id } => {
            let saved = state.toggle_saved_job(id)?;
            save_state(&db, &state)?;
            if saved {
                println!("Saved job #{}.", id);
            } else {
                println!("Removed job #{} from saved.", id);
            }
        }

        JobCommands::Saved => {
            let jobs: Vec<&Job> = state
                .saved_jobs()
                .iter()
                .filter_map(|id| state.job(*id))
                .collect();
            if jobs.is_empty() {
                println!("No saved jobs.");
            } else {
                print_job_table(&jobs);
            }
        }

        JobCommands::Location { name } => {
            if name.trim().is_empty() {
                return Err(anyhow!("Location cannot be empty"));
            }
            state.set_location(&name);
            state.rescore(config.jitter, &mut rng);
            save_state(&db, &state)?;
            let strong = matching::filter_by_match(state.jobs(), config.min_match_score).len();
            println!(
                "Location set to '{}'. {} job(s) score {} or higher.",
                state.user().location,
                strong,
                config.min_match_score
            );
        }

        JobCommands::Mode { mode } => {
            let mode: UserMode = mode.parse()?;
            state.set_mode(mode);
            save_state(&db, &state)?;
            match mode {
                UserMode::Helper => println!("You are now in helper mode."),
                UserMode::Needer => println!("You are now in needer mode."),
            }
        }

        JobCommands::Profile => {
            let user = state.user();
            println!("Name: {}{}", user.name, if user.is_verified { " (verified)" } else { "" });
            println!("Location: {}", user.location);
            println!("Mode: {}", user.mode);
            println!("Skills: {}", user.skills.join(", "));
            println!("Saved jobs: {}", state.saved_jobs().len());
        }

        JobCommands::Categories => {
            println!("{:<10} {:<20} {:>6}", "ID", "NAME", "JOBS");
            println!("{}", "-".repeat(38));
            for cat in seed::categories() {
                println!("{:<10} {:<20} {:>6}", cat.id, cat.name, cat.count);
            }
        }

        JobCommands::Browse => {
            tui::run_browse(&db, &mut state, &config, &mut rng)?;
        }

        JobCommands::Reset { saved_only } => {
            if saved_only {
                db.remove(SAVED_JOBS_KEY)?;
                println!("Cleared saved jobs.");
            } else {
                db.clear()?;
                println!("Cleared stored profile and saved jobs.");
            }
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
