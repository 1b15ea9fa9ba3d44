//! envx CLI
//!
//! Command-line interface for opening and rendering environments

use clap::{Parser, Subcommand};
use envx_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "envx")]
#[command(version, about = "envx - open and render remote environments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Environment operations
    Env(commands::env::EnvArgs),
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine; variables may come from the shell
    let _ = dotenvy::dotenv();
    init(Profile::from_log_format(
        std::env::var("ENVX_LOG_FORMAT").ok().as_deref(),
    ));

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Env(args) => commands::env::execute(args).await,
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
