use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::sla;
use crate::types::IssueStatus;

#[derive(Subcommand)]
pub enum SlaCommands {
    #[command(about = "Classify an issue against its due time")]
    Eval {
        #[arg(long, help = "Issue status, e.g. in_progress")]
        status: IssueStatus,
        #[arg(long, help = "SLA due time (RFC 3339); omit for issues without an SLA")]
        due_at: Option<DateTime<Utc>>,
        #[arg(long, help = "Evaluation time (RFC 3339), defaults to the current time")]
        now: Option<DateTime<Utc>>,
    },
}

pub async fn handle(cmd: SlaCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        SlaCommands::Eval { status, due_at, now } => {
            let now = now.unwrap_or_else(Utc::now);
            let result = sla::evaluate(due_at, status, now);

            output_success(
                output_format,
                &format!("SLA {}", result.describe()),
                Some(json!({ "sla": result, "evaluated_at": now })),
            )
        }
    }
}
