pub mod commands;
pub mod console;
pub mod export;
pub mod logging;
pub mod menu;
pub mod render;
pub mod session;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::commands::GlobalOptions;

#[derive(Debug, Parser)]
#[command(
    name = "agrotrack",
    about = "Agricultural product and transport vehicle registry",
    long_about = "Register agricultural products and transport vehicles, check which vehicle can carry a product, and export records to JSON.",
    after_help = "Examples:\n  agrotrack\n  agrotrack migrate\n  agrotrack doctor --json\n  agrotrack --database-url sqlite://farm.db menu"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a TOML config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Database URL, overrides config and environment")]
    database_url: Option<String>,
    #[arg(long, global = true, help = "Directory for exported JSON files")]
    export_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Log level: trace, debug, info, warn or error")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Open the interactive menu (default when no subcommand is given)")]
    Menu,
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Validate config, database connectivity and schema")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = GlobalOptions {
        config_path: cli.config,
        database_url: cli.database_url,
        export_directory: cli.export_dir,
        log_level: cli.log_level,
    };

    let result = match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => commands::menu::run(&options),
        Command::Migrate => commands::migrate::run(&options),
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(&options, json) }
        }
    };

    if !result.output.is_empty() {
        println!("{}", result.output);
    }
    ExitCode::from(result.exit_code)
}
