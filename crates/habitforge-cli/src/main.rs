use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitforge-cli", version, about = "HabitForge CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Streaks, weekly ratio and today's count
    Stats {
        /// Only list habits in this category ("all" for every habit)
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Level, experience and title
    Progress,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Daily wisdom
    Tip {
        /// Show the tip (or quote) of the day instead of a random one
        #[arg(long)]
        today: bool,
        /// Print a motivational quote instead of a tip
        #[arg(long)]
        quote: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("HABITFORGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Stats { category } => commands::stats::run(&category),
        Commands::Progress => commands::stats::progress(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Tip { today, quote } => commands::tip::run(today, quote),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
