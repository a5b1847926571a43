use clap::Subcommand;
use reqwest::header::CONTENT_DISPOSITION;
use serde_json::{json, Value};
use std::path::PathBuf;

use crate::cli::utils::{base_url, output_error, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ReportCommands {
    #[command(about = "Download the issue export for a jurisdiction")]
    Export {
        #[arg(long, env = "CIVIC_SERVER", default_value = "http://localhost:3000", help = "Server base URL")]
        server: String,
        #[arg(long, env = "CIVIC_TOKEN", hide_env_values = true, help = "Bearer token")]
        token: String,
        #[arg(long, help = "Scope: state, city, zone or ward")]
        scope: String,
        #[arg(long, help = "Jurisdiction id (not needed for state)")]
        id: Option<String>,
        #[arg(long, default_value = "csv", help = "Export format")]
        format: String,
        #[arg(long, short, help = "Output file (defaults to the server's filename)")]
        output: Option<PathBuf>,
    },
}

pub async fn handle(cmd: ReportCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ReportCommands::Export {
            server,
            token,
            scope,
            id,
            format,
            output,
        } => {
            let url = format!("{}/api/reports/export", base_url(&server));
            let mut query = vec![("scope", scope), ("format", format)];
            if let Some(id) = id {
                query.push(("id", id));
            }

            let response = reqwest::Client::new()
                .get(&url)
                .bearer_auth(token)
                .query(&query)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body: Value = response.json().await.unwrap_or(Value::Null);
                let message = body["message"].as_str().unwrap_or("export failed").to_string();
                output_error(output_format, &message, body["code"].as_str())?;
                anyhow::bail!("export failed with HTTP {}", status.as_u16());
            }

            let filename = response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok())
                .and_then(filename_from_disposition)
                .unwrap_or_else(|| "reports.csv".to_string());
            let path = output.unwrap_or_else(|| PathBuf::from(&filename));

            let bytes = response.bytes().await?;
            std::fs::write(&path, &bytes)?;

            output_success(
                output_format,
                &format!("Saved {} ({} bytes)", path.display(), bytes.len()),
                Some(json!({ "path": path, "bytes": bytes.len() })),
            )
        }
    }
}

/// Filename from `attachment; filename="..."`
fn filename_from_disposition(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty() && !name.contains('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition("attachment; filename=\"reports_state_all_2026-10-16.csv\""),
            Some("reports_state_all_2026-10-16.csv".to_string())
        );
        assert_eq!(filename_from_disposition("attachment"), None);
        assert_eq!(filename_from_disposition("attachment; filename=\"../etc/passwd\""), None);
    }
}
