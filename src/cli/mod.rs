pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "civic")]
#[command(about = "Civic CLI - access checks, SLA evaluation and report downloads for the dashboard API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Evaluate jurisdiction access offline")]
    Access {
        #[command(subcommand)]
        cmd: commands::access::AccessCommands,
    },

    #[command(about = "Evaluate SLA status offline")]
    Sla {
        #[command(subcommand)]
        cmd: commands::sla::SlaCommands,
    },

    #[command(about = "Download reports from a running server")]
    Report {
        #[command(subcommand)]
        cmd: commands::report::ReportCommands,
    },

    #[command(about = "Remote server checks")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Access { cmd } => commands::access::handle(cmd, output_format).await,
        Commands::Sla { cmd } => commands::sla::handle(cmd, output_format).await,
        Commands::Report { cmd } => commands::report::handle(cmd, output_format).await,
        Commands::Server { cmd } => commands::server::handle(cmd, output_format).await,
    }
}
