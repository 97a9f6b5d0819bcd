mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, gameplan::GameplanSubcommand, journal::JournalSubcommand,
    opponent::OpponentSubcommand, pool::PoolSubcommand, scouting::ScoutingSubcommand,
    session::SessionSubcommand, team::TeamSubcommand, terminology::TerminologySubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "callsheet",
    about = "Game-plan builder for football coaches — teams, scouting, play pools, and terminology",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .callsheet/ or .git/)
    #[arg(long, global = true, env = "CALLSHEET_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize callsheet in the current project
    Init {
        /// Project name (defaults to the directory name)
        #[arg(long)]
        project: Option<String>,
    },

    /// Manage teams
    Team {
        #[command(subcommand)]
        subcommand: TeamSubcommand,
    },

    /// Manage opponents
    Opponent {
        #[command(subcommand)]
        subcommand: OpponentSubcommand,
    },

    /// Enter and inspect scouting reports
    Scouting {
        #[command(subcommand)]
        subcommand: ScoutingSubcommand,
    },

    /// Manage team terminology
    Terminology {
        #[command(subcommand)]
        subcommand: TerminologySubcommand,
    },

    /// Manage the play pool for an opponent
    Pool {
        #[command(subcommand)]
        subcommand: PoolSubcommand,
    },

    /// Generate and show game plans
    Gameplan {
        #[command(subcommand)]
        subcommand: GameplanSubcommand,
    },

    /// Show or change the session context (selected team/opponent)
    Session {
        #[command(subcommand)]
        subcommand: SessionSubcommand,
    },

    /// Inspect the multi-step operation journal
    Journal {
        #[command(subcommand)]
        subcommand: JournalSubcommand,
    },

    /// Show or validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// List help videos
    Videos {
        /// Limit to one category
        #[arg(long)]
        category: Option<String>,
    },

    /// Start the API server
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3980")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root_path = cli.root.as_deref();
    let root = root::resolve_root(root_path);

    let result = match cli.command {
        Commands::Init { project } => cmd::init::run(&root, project.as_deref()),
        Commands::Team { subcommand } => cmd::team::run(&root, subcommand, cli.json),
        Commands::Opponent { subcommand } => cmd::opponent::run(&root, subcommand, cli.json),
        Commands::Scouting { subcommand } => cmd::scouting::run(&root, subcommand, cli.json),
        Commands::Terminology { subcommand } => cmd::terminology::run(&root, subcommand, cli.json),
        Commands::Pool { subcommand } => cmd::pool::run(&root, subcommand, cli.json),
        Commands::Gameplan { subcommand } => cmd::gameplan::run(&root, subcommand, cli.json),
        Commands::Session { subcommand } => cmd::session::run(&root, subcommand, cli.json),
        Commands::Journal { subcommand } => cmd::journal::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Videos { category } => cmd::videos::run(&root, category.as_deref(), cli.json),
        Commands::Serve { port, no_open } => cmd::ui::run(&root, port, no_open),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
