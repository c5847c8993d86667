use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::builder::{PossibleValue, PossibleValuesParser};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sunstone::config::Config;
use sunstone::dashboard::Dashboard;
use sunstone::db::Database;
use sunstone::models::{CreateProjectInput, BUDGETS, DELIVERABLES, DURATIONS, OBJECTIVES};
use sunstone::observer::{NotificationKind, NotificationLog};
use sunstone::wizard::{Advance, Wizard};
use sunstone::{api, render};

#[derive(Parser)]
#[command(name = "sunstone")]
#[command(about = "Project discovery and strategy dashboard")]
struct Cli {
    /// Database file (overrides config and SUNSTONE_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all project cards and stats
    List,
    /// Show aggregate stats only
    Stats,
    /// Create a project through the new-project wizard
    Create(CreateArgs),
    /// Open a project as the current project
    Open {
        /// Project id
        id: String,
    },
    /// Show the current project snapshot
    Current,
    /// Serve the dashboard JSON API
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Clear all stored data; the next start re-seeds the sample projects
    Reset,
}

#[derive(Args)]
struct CreateArgs {
    /// Project name (at least 3 characters)
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    industry: String,
    #[arg(long, default_value = "")]
    model_type: String,
    #[arg(long, default_value = "")]
    phase: String,
    #[arg(long, default_value = "")]
    region: String,
    /// Objective code; repeat for several
    #[arg(long = "objective", value_parser = option_codes(OBJECTIVES))]
    objectives: Vec<String>,
    /// What worries you most right now (at least 10 characters)
    #[arg(long)]
    concerns: String,
    #[arg(long, default_value = "")]
    opportunities: String,
    #[arg(long, value_parser = option_codes(DURATIONS))]
    duration: Option<String>,
    #[arg(long, value_parser = option_codes(DELIVERABLES))]
    deliverable: Option<String>,
    #[arg(long, value_parser = option_codes(BUDGETS))]
    budget: Option<String>,
}

impl From<CreateArgs> for CreateProjectInput {
    fn from(args: CreateArgs) -> Self {
        Self {
            name: args.name,
            industry: args.industry,
            model_type: args.model_type,
            phase: args.phase,
            region: args.region,
            objectives: args.objectives,
            main_concerns: args.concerns,
            main_opportunities: args.opportunities,
            duration: args.duration.unwrap_or_default(),
            deliverable: args.deliverable.unwrap_or_default(),
            budget: args.budget.unwrap_or_default(),
        }
    }
}

fn option_codes(options: &'static [(&'static str, &'static str)]) -> PossibleValuesParser {
    PossibleValuesParser::new(options.iter().map(|(code, label)| {
        PossibleValue::new(*code).help(*label)
    }))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "sunstone=info,tower_http=debug".into()),
    );

    // Logs go to stderr so command output on stdout stays clean
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_notifications(log: &NotificationLog) {
    for n in log.drain() {
        let tag = match n.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        };
        eprintln!("[{}] {}", tag, n.message);
    }
}

/// Load the dashboard and print whatever loading had to report.
fn open_dashboard(db: Database, config: &Config) -> (Dashboard, Arc<NotificationLog>) {
    let log = Arc::new(NotificationLog::new());
    let dashboard = Dashboard::open(db, log.clone(), config.backend())
        .with_project_page(config.project_page.clone());
    print_notifications(&log);
    (dashboard, log)
}

/// Wipe stored data without loading it first, so nothing is re-seeded.
fn reset(db: &Database) -> anyhow::Result<()> {
    db.clear().context("Failed to clear storage")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::load();
    if let Some(db) = cli.db {
        config.database_path = Some(db);
    }

    let db = config.open_database()?;

    match cli.command {
        Some(Commands::List) | None => {
            let (dashboard, _log) = open_dashboard(db, &config);
            print!("{}", render::render_stats(&dashboard.stats()));
            println!();
            print!("{}", render::render_cards(&dashboard.cards(Utc::now())));
        }
        Some(Commands::Stats) => {
            let (dashboard, _log) = open_dashboard(db, &config);
            print!("{}", render::render_stats(&dashboard.stats()));
        }
        Some(Commands::Create(args)) => {
            let mut wizard = Wizard::new();
            *wizard.draft_mut() = args.into();

            let input = loop {
                match wizard.advance() {
                    Ok(Advance::Next(step)) => tracing::debug!("Wizard at step {}", step.number()),
                    Ok(Advance::Submit(input)) => break input,
                    Err(e) => {
                        eprintln!("[error] {}", e);
                        std::process::exit(2);
                    }
                }
            };

            let (mut dashboard, log) = open_dashboard(db, &config);
            let result = dashboard.create_project(input).await;
            print_notifications(&log);
            let navigation = result?;
            println!("Created project {}", navigation.project_id);
            println!("Next: {}?id={}", navigation.target, navigation.project_id);
        }
        Some(Commands::Open { id }) => {
            let (dashboard, log) = open_dashboard(db, &config);
            let result = dashboard.open_project(&id);
            print_notifications(&log);
            let navigation = result?;
            println!("Next: {}?id={}", navigation.target, navigation.project_id);
        }
        Some(Commands::Current) => {
            let (dashboard, _log) = open_dashboard(db, &config);
            match dashboard.current_project() {
                Some(project) => println!("{}", serde_json::to_string_pretty(&project)?),
                None => println!("No current project."),
            }
        }
        Some(Commands::Serve { port }) => {
            let (dashboard, log) = open_dashboard(db, &config);
            let app = api::create_router(dashboard, log);

            let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
            tracing::info!("Sunstone API listening on http://127.0.0.1:{}", port);

            axum::serve(listener, app).await?;
        }
        Some(Commands::Reset) => {
            reset(&db)?;
            println!("Storage cleared.");
        }
    }

    Ok(())
}
