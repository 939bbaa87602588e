//! solace - command-line client for the wellness session engine
//!
//! This is the main entry point for the solace CLI. It wires together:
//! - Configuration loading
//! - Local sqlite store
//! - HTTP clients for the remote session store and activity catalog
//! - The lifecycle engine and analytics functions

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use solace_analytics::{
    activity_stats, category_stats, recommendation_stats, streak_info, time_based_stats,
};
use solace_api::{DifficultyLevel, DurationBucket};
use solace_config::{Settings, load_config};
use solace_core::{InitOutcome, SessionStore, WellnessEngine};
use solace_remote::HttpApi;
use solace_store::SqliteStore;
use solace_util::{ActivityId, UserId, default_config_path, format_duration};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// solace - track wellness activities and the statistics they accumulate
#[derive(Parser, Debug)]
#[command(name = "solace")]
#[command(about = "Wellness activity tracking and analytics", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/solace/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Backend base URL override (or set SOLACE_API_URL env var)
    #[arg(long, env = "SOLACE_API_URL")]
    api_url: Option<String>,

    /// Data directory override (or set SOLACE_DATA_DIR env var)
    #[arg(short, long, env = "SOLACE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Establish or restore the session
    Init,

    /// Start an activity
    Start { activity_id: String },

    /// Record progress for an activity (0.0 to 1.0)
    Progress { activity_id: String, value: f32 },

    /// Complete the active activity, reporting a mood level (1 to 5)
    Complete {
        activity_id: String,

        #[arg(long)]
        mood: f32,
    },

    /// Show the activity history log
    History {
        /// Most recent records to show
        #[arg(long, default_value_t = 50)]
        limit: usize,

        /// Re-fetch from the remote store first
        #[arg(long)]
        refresh: bool,
    },

    /// Show completion, points, and streak statistics
    Stats,

    /// Show the per-category breakdown
    Categories,

    /// Show the day/week/month and time-of-day breakdown
    Times,

    /// Show recommendation-accuracy statistics
    Recs,

    /// Show or update preferences
    Prefs {
        /// Set the difficulty level (beginner, intermediate, advanced)
        #[arg(long)]
        difficulty: Option<String>,

        /// Set the preferred duration (short, medium, long)
        #[arg(long)]
        duration: Option<String>,

        /// Add a favorite activity
        #[arg(long)]
        favorite: Option<String>,

        /// Toggle notifications
        #[arg(long)]
        notifications: Option<bool>,
    },

    /// Clear all local state and start a fresh session
    Reset,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = if args.config.exists() {
        load_config(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?
    } else {
        Settings {
            api_base_url: "http://localhost:8000".into(),
            request_timeout: Duration::from_secs(10),
            data_dir: solace_util::default_data_dir(),
            user_id: UserId::new("local"),
        }
    };

    if let Some(url) = &args.api_url {
        settings.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(dir) = &args.data_dir {
        settings.data_dir = dir.clone();
    }

    Ok(settings)
}

async fn make_engine(settings: &Settings) -> Result<(WellnessEngine, InitOutcome)> {
    std::fs::create_dir_all(&settings.data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", settings.data_dir))?;

    let db_path = settings.data_dir.join("solace.db");
    let store = Arc::new(
        SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database {:?}", db_path))?,
    );

    let http = Arc::new(
        HttpApi::new(settings.api_base_url.clone(), settings.request_timeout)
            .context("Failed to build HTTP client")?,
    );

    let mut session = SessionStore::new(store, http.clone(), settings.user_id.clone());
    let outcome = session
        .initialize()
        .await
        .context("Failed to initialize session")?;

    info!(outcome = ?outcome, "Session initialized");

    let engine =
        WellnessEngine::new(session, http).context("Failed to restore engine state")?;
    Ok((engine, outcome))
}

fn parse_difficulty(value: &str) -> Result<DifficultyLevel> {
    match value {
        "beginner" => Ok(DifficultyLevel::Beginner),
        "intermediate" => Ok(DifficultyLevel::Intermediate),
        "advanced" => Ok(DifficultyLevel::Advanced),
        other => anyhow::bail!("unknown difficulty level '{other}'"),
    }
}

fn parse_duration_bucket(value: &str) -> Result<DurationBucket> {
    match value {
        "short" => Ok(DurationBucket::Short),
        "medium" => Ok(DurationBucket::Medium),
        "long" => Ok(DurationBucket::Long),
        other => anyhow::bail!("unknown duration bucket '{other}'"),
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let settings = load_settings(&args)?;
    let (mut engine, outcome) = make_engine(&settings).await?;

    match args.command {
        Command::Init => {
            let session_id = engine
                .session()
                .session_id()
                .context("no session after initialize")?;
            let how = match outcome {
                InitOutcome::Created => "created",
                InitOutcome::Restored => "restored",
                InitOutcome::Offline => "restored offline (remote unreachable)",
            };
            println!("Session {session_id} {how}");
        }

        Command::Start { activity_id } => {
            let id = ActivityId::new(activity_id);
            engine.start_activity(&id, solace_util::now()).await?;
            println!("Started {id}");
        }

        Command::Progress { activity_id, value } => {
            let id = ActivityId::new(activity_id);
            engine.update_progress(&id, value)?;
            println!(
                "Progress for {id}: {:.0}%",
                engine.session().progress_for(&id) * 100.0
            );
        }

        Command::Complete { activity_id, mood } => {
            let id = ActivityId::new(activity_id);
            let event = engine.complete_activity(&id, mood, solace_util::now()).await?;
            if let solace_core::EngineEvent::ActivityCompleted {
                points,
                duration_seconds,
                ..
            } = event
            {
                println!(
                    "Completed {id} in {} for {points} points",
                    format_duration(Duration::from_secs(duration_seconds))
                );
            }
        }

        Command::History { limit, refresh } => {
            if refresh {
                engine.session_mut().refresh_history().await?;
            }
            let history = engine.session().history();
            let shown = history.iter().rev().take(limit);
            for item in shown {
                let marker = if item.completed { "done" } else { "open" };
                println!(
                    "{}  [{marker}]  {}  ({})",
                    item.start_time.format("%Y-%m-%d %H:%M"),
                    item.activity_title,
                    item.category
                );
            }
            if history.is_empty() {
                println!("No activity recorded yet");
            }
        }

        Command::Stats => {
            print_json(&activity_stats(engine.session().history()))?;
            print_json(&streak_info(engine.session().history()))?;
        }

        Command::Categories => {
            print_json(&category_stats(engine.session().history()))?;
        }

        Command::Times => {
            print_json(&time_based_stats(engine.session().history()))?;
        }

        Command::Recs => {
            print_json(&recommendation_stats(engine.session().history()))?;
        }

        Command::Prefs {
            difficulty,
            duration,
            favorite,
            notifications,
        } => {
            let mut prefs = engine.session().preferences().clone();
            let mut changed = false;

            if let Some(value) = difficulty {
                prefs.difficulty_level = parse_difficulty(&value)?;
                changed = true;
            }
            if let Some(value) = duration {
                prefs.preferred_duration = parse_duration_bucket(&value)?;
                changed = true;
            }
            if let Some(id) = favorite {
                prefs.favorite_activities.insert(ActivityId::new(id));
                changed = true;
            }
            if let Some(value) = notifications {
                prefs.notifications = value;
                changed = true;
            }

            if changed {
                engine.session_mut().update_preferences(prefs).await?;
            }
            print_json(engine.session().preferences())?;
        }

        Command::Reset => {
            engine.reset().await?;
            let session_id = engine
                .session()
                .session_id()
                .context("no session after reset")?;
            println!("Session reset; new session {session_id}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    run(args).await
}
