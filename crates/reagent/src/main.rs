//! reagent - a ReAct tool-using agent

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{ask_command, init_command, status_command, tools_command};

/// reagent - reason, act, observe
#[derive(Parser)]
#[command(name = "reagent")]
#[command(about = "◆ A ReAct agent that reasons and calls tools")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config
    Init,
    /// Ask the agent a question
    Ask {
        /// Question to ask; omit for interactive mode
        #[arg(short, long)]
        message: Option<String>,
        /// Override the step budget from config
        #[arg(long)]
        max_steps: Option<u32>,
    },
    /// Show system status
    Status,
    /// List enabled tools
    Tools,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init => init_command().await,
        Commands::Ask { message, max_steps } => ask_command(message, max_steps).await,
        Commands::Status => status_command().await,
        Commands::Tools => tools_command().await,
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}
