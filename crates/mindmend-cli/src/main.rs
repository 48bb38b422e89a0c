use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mindmend-cli", version, about = "MindMend journaling analytics CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current journaling streak
    Streak(commands::streak::StreakArgs),
    /// Mood distribution and trend over the trailing window
    Insights(commands::insights::InsightsArgs),
    /// Full evaluation including the once-per-day badge decision
    Badge(commands::badge::BadgeArgs),
    /// Re-emit entries as a JSON export envelope
    Export(commands::export::ExportArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    mindmend_core::logging::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Streak(args) => commands::streak::run(args),
        Commands::Insights(args) => commands::insights::run(args),
        Commands::Badge(args) => commands::badge::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
